//! Policy evaluator
//!
//! Runs the realm's policies in declared order and stops at the first
//! failure, so the order of the specification decides which error wins.

use tracing::{debug, info};

use super::provider::PolicySession;
use crate::domain::entities::{Realm, UserIdentity};
use crate::domain::value_objects::PolicyError;

/// Everything one evaluation looks at
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub realm: &'a Realm,
    pub user: &'a UserIdentity,
    pub candidate: &'a str,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(realm: &'a Realm, user: &'a UserIdentity, candidate: &'a str) -> Self {
        Self {
            realm,
            user,
            candidate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PolicyEvaluator {
    session: PolicySession,
}

impl PolicyEvaluator {
    pub fn new(session: PolicySession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PolicySession {
        &self.session
    }

    /// `Ok(())` if every configured policy accepts the candidate,
    /// otherwise the error of the first policy that rejects it.
    pub fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<(), PolicyError> {
        let policy = ctx.realm.password_policy();

        for (position, entry) in policy.entries().iter().enumerate() {
            let provider = entry.factory().create(&self.session);

            if let Some(error) = provider.validate(ctx.realm, ctx.user, ctx.candidate, entry.config())
            {
                info!(
                    realm = ctx.realm.name(),
                    user_id = %ctx.user.id,
                    policy = entry.id(),
                    position,
                    message_key = error.message_key(),
                    "password rejected by policy"
                );
                return Err(error);
            }

            debug!(
                realm = ctx.realm.name(),
                user_id = %ctx.user.id,
                policy = entry.id(),
                "policy passed"
            );
        }

        Ok(())
    }
}
