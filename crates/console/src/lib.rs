//! `adminconsole-console`
//!
//! **Responsibility:** the console's presentation and orchestration layer.
//!
//! This crate provides:
//! - A generic list controller, instantiated for profiles, scopes and partners
//! - The data table contract (columns, row actions, search highlighting)
//! - Form models, dialog contracts and the uniqueness validator
//! - Notification relay and message catalog
//!
//! Rendering is left to whichever UI binds the [`table::TableView`] and the
//! dialog traits; the API is reached through `adminconsole-api`.

pub mod config;
pub mod controller;
pub mod dialog;
pub mod features;
pub mod filter;
pub mod forms;
pub mod i18n;
pub mod notification;
pub mod services;
pub mod table;
pub mod validators;

pub use config::ConsoleConfig;
pub use controller::{Feature, FeatureMessages, ListController, Phase};
pub use dialog::{
    ConfirmationDialog, ConfirmationRequest, FormDialog, FormScript, ScriptedConfirmation,
    ScriptedFormDialog,
};
pub use features::{Partners, PartnersController, Profiles, ProfilesController, Scopes, ScopesController};
pub use i18n::{Catalog, MessageParams, Translator};
pub use notification::{
    InMemoryToastSink, Notifier, Placement, Severity, Toast, ToastSink, TracingToastSink,
};
pub use services::ConsoleServices;
