// Application layer - Use cases
pub mod dashboard_service;
pub mod entry_service;
pub mod sheet_repository;
