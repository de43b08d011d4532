// MASH Rust Source Code File
//
// Licensed under the BSD 3-Clause license. See LICENSE file in the project root
// for full license information.

//! Command metadata and typed handler dispatch.
//!
//! A command's signature varies by shape — no params/no response, params
//! with a simple response, or params with a typed response (spec.md §4.4).
//! Rather than function-pointer gymnastics to unify these under one
//! signature, the handler field is a tagged variant, one arm per shape,
//! and the dispatcher switches on the variant — the same shape the source
//! stack uses for its own per-message dispatch unions.

use crate::capability::value::AttributeValue;
use crate::errors::MashError;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub type CommandArgs = HashMap<String, AttributeValue>;
pub type CommandResponse = HashMap<String, AttributeValue>;
pub type CommandResult<T> = Result<T, MashError>;

/// A simple response is either empty or a single `success: bool` field —
/// these may be elided on the wire per spec.md §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleResponse {
  pub success: bool,
}

impl SimpleResponse {
  pub fn ok() -> Self {
    Self { success: true }
  }

  pub fn failed() -> Self {
    Self { success: false }
  }
}

/// Metadata for a single parameter or response field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandField {
  pub name: String,
  pub data_type_name: String,
  pub required: bool,
}

/// Command metadata (spec.md §3 "Command").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMeta {
  pub id: u8,
  pub name: String,
  pub mandatory: bool,
  pub parameters: Vec<CommandField>,
  pub response_fields: Vec<CommandField>,
}

/// A command execution context: the endpoint/feature a command was invoked
/// against. Kept intentionally small — this workspace does not own the
/// interaction protocol layer that would thread session/auth state through
/// it (spec.md §1 non-goals).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandContext {
  pub endpoint_id: u8,
  pub feature_id: u8,
}

/// Tagged variant over the four command-handler signature shapes named in
/// spec.md §4.4. `Clone` is derived so a `Feature` carrying a command table
/// can itself be cloned (mirroring the capability-model's `Clone` fields).
#[derive(Clone)]
pub enum CommandHandler {
  NoArgsNoResponse(Arc<dyn Fn(CommandContext) -> BoxFuture<'static, CommandResult<()>> + Send + Sync>),
  ArgsNoResponse(
    Arc<dyn Fn(CommandContext, CommandArgs) -> BoxFuture<'static, CommandResult<()>> + Send + Sync>,
  ),
  ArgsSimpleResponse(
    Arc<
      dyn Fn(CommandContext, CommandArgs) -> BoxFuture<'static, CommandResult<SimpleResponse>>
        + Send
        + Sync,
    >,
  ),
  ArgsTypedResponse(
    Arc<
      dyn Fn(CommandContext, CommandArgs) -> BoxFuture<'static, CommandResult<CommandResponse>>
        + Send
        + Sync,
    >,
  ),
}

impl CommandHandler {
  /// Dispatches a command invocation. When no handler is registered for a
  /// command, spec.md §4.4 requires returning `{success:false}` without an
  /// error, so the dispatcher itself (not the handler) owns that fallback —
  /// see [`Feature::invoke`](crate::capability::feature::Feature::invoke).
  pub async fn invoke(&self, ctx: CommandContext, args: CommandArgs) -> CommandResult<CommandResponse> {
    match self {
      CommandHandler::NoArgsNoResponse(f) => {
        f(ctx).await?;
        Ok(CommandResponse::new())
      }
      CommandHandler::ArgsNoResponse(f) => {
        f(ctx, args).await?;
        Ok(CommandResponse::new())
      }
      CommandHandler::ArgsSimpleResponse(f) => {
        let resp = f(ctx, args).await?;
        let mut out = CommandResponse::new();
        out.insert("success".to_owned(), AttributeValue::Bool(resp.success));
        Ok(out)
      }
      CommandHandler::ArgsTypedResponse(f) => f(ctx, args).await,
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[tokio::test]
  async fn test_no_args_no_response_dispatch() {
    let handler = CommandHandler::NoArgsNoResponse(Arc::new(|_ctx| Box::pin(async { Ok(()) })));
    let ctx = CommandContext {
      endpoint_id: 1,
      feature_id: 5,
    };
    let resp = handler.invoke(ctx, CommandArgs::new()).await.unwrap();
    assert!(resp.is_empty());
  }

  #[tokio::test]
  async fn test_simple_response_dispatch() {
    let handler = CommandHandler::ArgsSimpleResponse(Arc::new(|_ctx, _args| {
      Box::pin(async { Ok(SimpleResponse::ok()) })
    }));
    let ctx = CommandContext {
      endpoint_id: 1,
      feature_id: 5,
    };
    let resp = handler.invoke(ctx, CommandArgs::new()).await.unwrap();
    assert_eq!(resp.get("success"), Some(&AttributeValue::Bool(true)));
  }
}
