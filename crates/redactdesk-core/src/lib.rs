//! # redactdesk-core
//!
//! Core logic for the `RedactDesk` redacted-email review console.
//!
//! This crate provides:
//! - Records for messages, folders and filter rules
//! - Explicit API configuration and an HTTP client threaded through every call
//! - **Resource hooks** - fetch and mutate bindings with a per-kind cache that
//!   is invalidated, never patched, after a successful mutation
//! - **Forms** - create folder, create rule, forward message and delete
//!   confirmation state machines
//! - **Shell** - notifications, breadcrumbs, drawers and navigation passed to
//!   screens as a capability struct
//! - Column sets binding each record type to the collection engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod client;
pub mod columns;
pub mod config;
pub mod credentials;
mod error;
pub mod form;
pub mod format;
pub mod model;
pub mod notification;
pub mod resource;
pub mod shell;

pub use cache::{CacheKey, ResourceCache, ResourceKind};
pub use client::ApiClient;
pub use config::{ApiConfig, FeatureSet};
pub use credentials::{CredentialError, CredentialResult};
pub use error::{Error, Result};
pub use form::{
    CreateFolderForm, CreateRuleForm, DeleteConfirmation, DeleteTarget, FormPhase,
    ForwardMessageForm, SubmitOutcome, ValidationError, ValidationResult,
};
pub use model::{
    Attachment, CaseId, EmailMessage, FieldCondition, Folder, FolderId, FolderRef, Rule, RuleField,
    RuleId, RuleLineItem,
};
pub use notification::{Notification, NotificationKind, Notifications};
pub use resource::{ExportedFile, FolderResource, MessageResource, Resources, RuleResource};
pub use shell::{Breadcrumb, Drawer, NavItem, Route, Shell, nav_items};
