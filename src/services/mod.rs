pub mod records_service;
pub mod tree_view;
pub mod vault_service;
