pub mod browse_service;
pub mod data_view;
pub mod serializer;
