//! Reading server-rendered fragments.
//!
//! The fragments are small and re-parsed on every render; nothing here keeps
//! a parsed tree around.

use scraper::{ElementRef, Html, Selector};

use super::widgets::WidgetKind;
use super::PageError;
use crate::models::{Alert, AlertKind, LaunchSelection};

fn selector(css: &str) -> Result<Selector, PageError> {
    Selector::parse(css).map_err(|e| PageError::Selector(format!("{css}: {e:?}")))
}

/// Visible text of an element with runs of whitespace collapsed.
fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty_attr(el: ElementRef<'_>, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One alert banner found in an alerts fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBlock {
    pub alert: Alert,
    /// Whether the banner has a close affordance the operator can use.
    pub dismissable: bool,
}

pub fn parse_alerts(html: &str) -> Result<Vec<AlertBlock>, PageError> {
    let doc = Html::parse_fragment(html);
    let alert_sel = selector(".alert[data-alert-id]")?;
    let dismiss_sel = selector("[data-dismiss=\"alert\"]")?;
    let title_sel = selector(".alert-title")?;
    let message_sel = selector(".alert-message")?;

    let mut out = Vec::new();
    for el in doc.select(&alert_sel) {
        let id = el.value().attr("data-alert-id").unwrap_or_default().trim().to_string();
        if id.is_empty() {
            continue;
        }
        let kind = el
            .value()
            .classes()
            .filter_map(|c| c.strip_prefix("alert-"))
            .find_map(AlertKind::from_str);
        let title = el.select(&title_sel).next().map(text_of).unwrap_or_default();
        let message = match el.select(&message_sel).next() {
            Some(m) => text_of(m),
            None => text_of(el),
        };
        out.push(AlertBlock {
            alert: Alert { id, kind, title, message },
            dismissable: el.select(&dismiss_sel).next().is_some(),
        });
    }
    Ok(out)
}

/// The two radio groups of the launch-options table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioGroup {
    InstanceType,
    Zone,
}

impl RadioGroup {
    pub fn input_name(&self) -> &'static str {
        match self {
            Self::InstanceType => "launchConfigGroup",
            Self::Zone => "zoneGroup",
        }
    }

    /// Row attribute naming the option explicitly.
    fn data_attr(&self) -> &'static str {
        match self {
            Self::InstanceType => "data-instance-type",
            Self::Zone => "data-zone",
        }
    }

    /// Cell position the option text historically occupies.
    fn legacy_cell(&self) -> usize {
        match self {
            Self::InstanceType => 2,
            Self::Zone => 1,
        }
    }
}

/// One selectable row of the launch-options table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRow {
    pub value: String,
    pub checked: bool,
}

/// The launch-options form as the operator currently has it filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchForm {
    pub instance_types: Vec<LaunchRow>,
    pub zones: Vec<LaunchRow>,
}

impl LaunchForm {
    pub fn parse(html: &str) -> Result<Self, PageError> {
        let doc = Html::parse_fragment(html);
        let row_sel = selector("tr")?;
        let type_sel = selector(&format!("input[name=\"{}\"]", RadioGroup::InstanceType.input_name()))?;
        let zone_sel = selector(&format!("input[name=\"{}\"]", RadioGroup::Zone.input_name()))?;

        let mut form = LaunchForm::default();
        for row in doc.select(&row_sel) {
            if let Some(radio) = row.select(&type_sel).next() {
                form.instance_types.push(read_row(row, radio, RadioGroup::InstanceType));
            } else if let Some(radio) = row.select(&zone_sel).next() {
                form.zones.push(read_row(row, radio, RadioGroup::Zone));
            }
        }
        Ok(form)
    }

    pub fn rows(&self, group: RadioGroup) -> &[LaunchRow] {
        match group {
            RadioGroup::InstanceType => &self.instance_types,
            RadioGroup::Zone => &self.zones,
        }
    }

    /// Check `value` in `group`, unchecking the rest of the group.
    /// Returns false (and changes nothing) when no row carries `value`.
    pub fn check(&mut self, group: RadioGroup, value: &str) -> bool {
        let rows = match group {
            RadioGroup::InstanceType => &mut self.instance_types,
            RadioGroup::Zone => &mut self.zones,
        };
        if !rows.iter().any(|r| r.value == value) {
            return false;
        }
        for row in rows.iter_mut() {
            row.checked = row.value == value;
        }
        true
    }

    pub fn uncheck_all(&mut self, group: RadioGroup) {
        let rows = match group {
            RadioGroup::InstanceType => &mut self.instance_types,
            RadioGroup::Zone => &mut self.zones,
        };
        rows.iter_mut().for_each(|r| r.checked = false);
    }

    /// Current selection; an unchecked instance-type group yields an empty type.
    pub fn selection(&self) -> LaunchSelection {
        let checked = |rows: &[LaunchRow]| rows.iter().find(|r| r.checked).map(|r| r.value.clone());
        LaunchSelection {
            instance_type: checked(&self.instance_types).unwrap_or_default(),
            zone: checked(&self.zones),
        }
    }
}

fn read_row(row: ElementRef<'_>, radio: ElementRef<'_>, group: RadioGroup) -> LaunchRow {
    let value = non_empty_attr(row, group.data_attr())
        .or_else(|| non_empty_attr(radio, "value"))
        .or_else(|| {
            row.children()
                .filter_map(ElementRef::wrap)
                .nth(group.legacy_cell())
                .map(text_of)
        })
        .unwrap_or_default();
    LaunchRow {
        value,
        checked: radio.value().attr("checked").is_some(),
    }
}

/// Identifiers of every element flagged for `kind` (`data-toggle=...`).
/// Elements without an `id` are named by tag and position.
pub fn flagged_widgets(html: &str, kind: WidgetKind) -> Result<Vec<String>, PageError> {
    let doc = Html::parse_fragment(html);
    let sel = selector(&format!("[data-toggle=\"{}\"]", kind.toggle_value()))?;
    Ok(doc
        .select(&sel)
        .enumerate()
        .map(|(i, el)| {
            non_empty_attr(el, "id").unwrap_or_else(|| format!("{}:{}", el.value().name(), i))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALERTS: &str = r#"
        <div class="alert alert-success alert-dismissible" data-alert-id="a1">
          <button type="button" class="close" data-dismiss="alert">&times;</button>
          <strong class="alert-title">Launched</strong>
          <span class="alert-message">Node   t2.micro is starting.</span>
        </div>
        <div class="alert alert-danger" data-alert-id="a2">Quota exceeded</div>
        <div class="alert alert-info">no id, ignored</div>
    "#;

    #[test]
    fn alerts_are_read_with_their_ids() {
        let blocks = parse_alerts(ALERTS).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].alert.id, "a1");
        assert_eq!(blocks[0].alert.kind, Some(AlertKind::Success));
        assert_eq!(blocks[0].alert.title, "Launched");
        assert_eq!(blocks[0].alert.message, "Node t2.micro is starting.");
        assert!(blocks[0].dismissable);
    }

    #[test]
    fn alert_without_close_button_is_not_dismissable() {
        let blocks = parse_alerts(ALERTS).unwrap();
        assert_eq!(blocks[1].alert.kind, Some(AlertKind::Error));
        assert_eq!(blocks[1].alert.message, "Quota exceeded");
        assert!(!blocks[1].dismissable);
    }

    #[test]
    fn empty_fragment_has_no_alerts() {
        assert!(parse_alerts("").unwrap().is_empty());
    }

    #[test]
    fn legacy_rows_fall_back_to_cell_position() {
        let html = r#"<table>
            <tr><td><input type="radio" name="launchConfigGroup" checked></td><td>General</td><td> t2.micro </td></tr>
            <tr><td><input type="radio" name="launchConfigGroup"></td><td>General</td><td>m5.large</td></tr>
            <tr><td><input type="radio" name="zoneGroup"></td><td>us-east-1a</td></tr>
        </table>"#;
        let form = LaunchForm::parse(html).unwrap();
        assert_eq!(form.instance_types.len(), 2);
        assert_eq!(form.zones[0].value, "us-east-1a");
        assert_eq!(
            form.selection(),
            LaunchSelection { instance_type: "t2.micro".into(), zone: None }
        );
    }

    #[test]
    fn named_attributes_win_over_cell_text() {
        let html = r#"<table>
            <tr data-instance-type="c5.large"><td><input type="radio" name="launchConfigGroup" value="ignored" checked></td><td>CPU</td><td>c5.large ($0.085/h)</td></tr>
            <tr><td><input type="radio" name="zoneGroup" value="us-east-1c" checked></td><td>US East 1c</td></tr>
        </table>"#;
        let form = LaunchForm::parse(html).unwrap();
        let sel = form.selection();
        assert_eq!(sel.instance_type, "c5.large");
        assert_eq!(sel.zone.as_deref(), Some("us-east-1c"));
    }

    #[test]
    fn checking_a_row_unchecks_its_group() {
        let html = r#"<table>
            <tr data-instance-type="t2.micro"><td><input type="radio" name="launchConfigGroup" checked></td></tr>
            <tr data-instance-type="t2.small"><td><input type="radio" name="launchConfigGroup"></td></tr>
        </table>"#;
        let mut form = LaunchForm::parse(html).unwrap();
        assert!(form.check(RadioGroup::InstanceType, "t2.small"));
        assert_eq!(form.instance_types.iter().filter(|r| r.checked).count(), 1);
        assert_eq!(form.selection().instance_type, "t2.small");
        assert!(!form.check(RadioGroup::InstanceType, "x9.huge"));
        assert_eq!(form.selection().instance_type, "t2.small");
    }

    #[test]
    fn widgets_without_id_get_positional_names() {
        let html = r#"<div>
            <button id="launch-instance-button" data-toggle="popover">Launch</button>
            <a data-toggle="confirmation" href="/x">Terminate</a>
            <a data-toggle="confirmation" id="stop-7" href="/y">Stop</a>
        </div>"#;
        assert_eq!(flagged_widgets(html, WidgetKind::Popover).unwrap(), vec!["launch-instance-button"]);
        assert_eq!(flagged_widgets(html, WidgetKind::Confirmation).unwrap(), vec!["a:0", "stop-7"]);
    }
}
