pub mod configuration;
pub mod controller;
pub mod error_handling;
pub mod notification;
pub mod photo_management;
pub mod storage;
pub mod upload;
pub mod web_interface;
