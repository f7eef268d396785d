//! 报表输出

pub mod dashboard;

pub use dashboard::{
    build_report, DashboardReport, ExecutiveSummary, HierarchyReport, HierarchyTotals,
};
