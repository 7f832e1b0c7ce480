pub mod item_service;
