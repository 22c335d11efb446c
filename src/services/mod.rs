//! Domain services behind the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own orchestration and resource concerns so route
//! handlers can stay focused on protocol translation.

pub mod generate;
