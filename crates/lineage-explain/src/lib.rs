//! Lineage decision explanations.
//!
//! This crate turns a [`LineageRecord`](lineage_model::LineageRecord) into a
//! display model and asks a hosted language model about it.
//!
//! # Overview
//!
//! - [`LineageView`] renders the decision type, the rule text and, when the
//!   record is complete, the merge table; otherwise it carries one warning per
//!   missing side.
//! - [`ExplainAction`] defines the two questions ("evaluate for
//!   inconsistency", "explain the result"), their prompts and token budgets.
//! - [`Explainer`] sends an action to an [`InferenceClient`] and records the
//!   outcome in the [`Session`] as an [`ActionState`].
//! - [`ServingClient`] is the HTTP implementation for a model-serving
//!   workspace.
//!
//! # Example
//!
//! ```no_run
//! use lineage_explain::{ExplainAction, Explainer, ServingClient, ServingSettings, Session};
//!
//! async fn explain() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServingSettings::from_env().resolve()?;
//!     let client = ServingClient::new(&config)?;
//!     let explainer = Explainer::new(client, config.endpoint.clone());
//!
//!     let mut session = Session::new(lineage_model::sample_record()?);
//!     let state = explainer
//!         .perform(&mut session, ExplainAction::ExplainResult, std::future::pending())
//!         .await;
//!     println!("{state:?}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod explainer;
pub mod prompt;
pub mod serving;
pub mod session;
pub mod view;

pub use client::{ChatMessage, InferenceClient, ModelResponse, Role};
pub use config::{ServingConfig, ServingSettings};
pub use error::{ClientError, ConfigError, ExplainError};
pub use explainer::Explainer;
pub use prompt::{ExplainAction, PROMPT_SEPARATOR, build_messages};
pub use serving::ServingClient;
pub use session::{ActionState, Session};
pub use view::{LineageView, ViewWarning};
