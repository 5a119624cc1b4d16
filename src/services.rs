pub mod auth;
pub mod billing;
pub mod document_service;
pub mod export_service;
pub mod fixed_expense_service;
pub mod installment_service;
pub mod report_service;
pub mod schedule;
