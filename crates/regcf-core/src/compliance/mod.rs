pub mod annual_report;
pub mod fiscal_calendar;
pub mod workflow;
