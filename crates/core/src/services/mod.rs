pub mod company_service;
pub mod export_generator;
pub mod selection_controller;
pub mod view_builder;
