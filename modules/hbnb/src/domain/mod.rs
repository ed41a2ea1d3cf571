pub mod access;
pub mod entity;
pub mod error;
pub mod ports;
pub mod repo;
pub mod service;
