mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{alert_html, ScriptedFetcher};
use observatory::api::{clear_alert_url, NODES_ALERTS_PATH};
use observatory::dashboard::AlertsPanel;
use observatory::page::{lock_page, AlertState, Page, SharedPage, ALERTS_CONTAINER};

fn ids(page: &SharedPage) -> Vec<String> {
    lock_page(page).visible_alerts().iter().map(|a| a.id.clone()).collect()
}

fn panel_with(fetcher: Arc<ScriptedFetcher>) -> (AlertsPanel, SharedPage) {
    let page = Page::new("").shared();
    (AlertsPanel::new(page.clone(), fetcher), page)
}

#[tokio::test]
async fn test_refresh_replaces_region() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let list = format!("{}{}", alert_html("a1", "info", "Scaling"), alert_html("a2", "warning", "Spot"));
    fetcher.respond(NODES_ALERTS_PATH, &list);
    let (panel, page) = panel_with(fetcher);

    assert_eq!(panel.refresh().await.unwrap(), 2);

    assert_eq!(ids(&page), vec!["a1", "a2"]);
    assert_eq!(lock_page(&page).region(ALERTS_CONTAINER), Some(list.as_str()));
}

#[tokio::test]
async fn test_failed_refresh_keeps_existing_content() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(NODES_ALERTS_PATH, &alert_html("a1", "info", "Scaling"));
    let (panel, page) = panel_with(fetcher.clone());
    panel.refresh().await.unwrap();
    let before = lock_page(&page).region(ALERTS_CONTAINER).map(str::to_string);

    fetcher.fail(NODES_ALERTS_PATH);
    assert!(panel.refresh().await.is_err());

    assert_eq!(lock_page(&page).region(ALERTS_CONTAINER).map(str::to_string), before);
    assert_eq!(ids(&page), vec!["a1"]);
}

#[tokio::test]
async fn test_dismiss_renders_returned_list() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let both = format!("{}{}", alert_html("a1", "info", "Scaling"), alert_html("a2", "danger", "Quota"));
    fetcher.respond(NODES_ALERTS_PATH, &both);
    fetcher.respond(&clear_alert_url("a1"), &alert_html("a2", "danger", "Quota"));
    let (panel, page) = panel_with(fetcher.clone());
    panel.refresh().await.unwrap();

    panel.dismiss("a1").await.unwrap();

    assert_eq!(ids(&page), vec!["a2"]);
    assert_eq!(fetcher.count("/observatory/clear_alert?alert_id=a1"), 1);
}

#[tokio::test]
async fn test_failed_dismiss_does_not_restore_alert() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    let both = format!("{}{}", alert_html("a1", "info", "Scaling"), alert_html("a2", "danger", "Quota"));
    fetcher.respond(NODES_ALERTS_PATH, &both);
    fetcher.fail(&clear_alert_url("a1"));
    let (panel, page) = panel_with(fetcher.clone());
    panel.refresh().await.unwrap();

    {
        let mut p = lock_page(&page);
        p.close_alert("a1").unwrap();
        p.finish_closing("a1");
    }
    let before = lock_page(&page).region(ALERTS_CONTAINER).map(str::to_string);
    assert!(panel.dismiss("a1").await.is_err());

    assert_eq!(lock_page(&page).region(ALERTS_CONTAINER).map(str::to_string), before);
    assert_eq!(before.as_deref(), Some(both.as_str()));
    assert_eq!(lock_page(&page).alert_state("a1"), Some(AlertState::RemovedPendingRefresh));
    assert_eq!(ids(&page), vec!["a2"]);

    // the next successful refresh is authoritative, even if the server still has it
    panel.refresh().await.unwrap();
    assert_eq!(ids(&page), vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_successful_renders_are_announced() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(NODES_ALERTS_PATH, "");
    let (panel, _) = panel_with(fetcher.clone());
    let mut renders = panel.subscribe();

    panel.refresh().await.unwrap();
    assert!(renders.has_changed().unwrap());
    let _ = renders.borrow_and_update();

    fetcher.fail(NODES_ALERTS_PATH);
    let _ = panel.refresh().await;
    assert!(!renders.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_polling_fetches_immediately_then_every_interval() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(NODES_ALERTS_PATH, &alert_html("a1", "info", "Scaling"));
    let (panel, _) = panel_with(fetcher.clone());

    let handle = panel.schedule_polling(Duration::from_secs(30));

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 1);
    tokio::time::sleep(Duration::from_secs(29)).await;
    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 1);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 2);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 4);

    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_polling_keeps_going_after_failures() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.fail(NODES_ALERTS_PATH);
    let (panel, page) = panel_with(fetcher.clone());

    let handle = panel.schedule_polling(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(95)).await;

    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 4);
    assert!(handle.is_running());
    assert_eq!(lock_page(&page).region(ALERTS_CONTAINER), None);
    handle.stop().await;
}

#[tokio::test(start_paused = true)]
async fn test_stopped_polling_issues_no_more_fetches() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.respond(NODES_ALERTS_PATH, "");
    let (panel, _) = panel_with(fetcher.clone());

    let handle = panel.schedule_polling(Duration::from_secs(30));
    tokio::time::sleep(Duration::from_secs(31)).await;
    handle.stop().await;
    tokio::time::sleep(Duration::from_secs(300)).await;

    assert_eq!(fetcher.count(NODES_ALERTS_PATH), 2);
}
