// Task-Modul: Enthält alle Embassy Tasks
//
// Es gibt genau einen Task: die Report-Schleife.

pub mod report;

// Re-export Tasks für einfachen Import
pub use report::report_task;
