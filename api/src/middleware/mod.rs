//! Request middleware

pub mod tenant;
