use serde::Serialize;

/// Display grouping of an instance type in the launch form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InstanceCategory {
    General,
    Cpu,
    Gpu,
    Memory,
}

impl InstanceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Cpu => "CPU",
            Self::Gpu => "GPU",
            Self::Memory => "Memory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InstanceTypeInfo {
    pub name: &'static str,
    pub category: InstanceCategory,
    /// On-demand price in USD per hour.
    pub hourly_cost: f64,
}

use self::InstanceCategory::{Cpu, General, Gpu, Memory};

macro_rules! it {
    ($name:expr, $category:expr, $cost:expr) => {
        InstanceTypeInfo { name: $name, category: $category, hourly_cost: $cost }
    };
}

/// Instance types the dashboard can launch, in display order.
pub const INSTANCE_CATALOG: &[InstanceTypeInfo] = &[
    it!("t2.nano", General, 0.0058),
    it!("t2.micro", General, 0.0116),
    it!("t2.small", General, 0.023),
    it!("t2.medium", General, 0.0464),
    it!("t2.large", General, 0.0928),
    it!("t2.xlarge", General, 0.1856),
    it!("c4.large", Cpu, 0.1),
    it!("c4.xlarge", Cpu, 0.199),
    it!("c4.2xlarge", Cpu, 0.398),
    it!("c4.4xlarge", Cpu, 0.796),
    it!("c4.8xlarge", Cpu, 1.591),
    it!("c5.large", Cpu, 0.085),
    it!("c5.xlarge", Cpu, 0.17),
    it!("c5.2xlarge", Cpu, 0.34),
    it!("c5.4xlarge", Cpu, 0.68),
    it!("c5.9xlarge", Cpu, 1.53),
    it!("c5.18xlarge", Cpu, 3.06),
    it!("c5.24xlarge", Cpu, 4.08),
    it!("p2.xlarge", Gpu, 0.9),
    it!("p2.8xlarge", Gpu, 7.2),
    it!("p2.16xlarge", Gpu, 14.4),
    it!("p3.2xlarge", Gpu, 3.06),
    it!("p3.8xlarge", Gpu, 12.24),
    it!("p3.16xlarge", Gpu, 24.48),
    it!("g3.4xlarge", Gpu, 1.14),
    it!("g3.8xlarge", Gpu, 2.28),
    it!("g3.16xlarge", Gpu, 4.56),
    it!("m4.16xlarge", Memory, 3.20),
    it!("x1.16xlarge", Memory, 6.669),
    it!("x1.32xlarge", Memory, 13.338),
];

pub fn find_instance_type(name: &str) -> Option<&'static InstanceTypeInfo> {
    INSTANCE_CATALOG.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_names_are_unique() {
        let names: HashSet<_> = INSTANCE_CATALOG.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), INSTANCE_CATALOG.len());
    }

    #[test]
    fn lookup_by_name() {
        let t = find_instance_type("p3.2xlarge").unwrap();
        assert_eq!(t.category, InstanceCategory::Gpu);
        assert!(find_instance_type("m5.large").is_none());
    }
}
