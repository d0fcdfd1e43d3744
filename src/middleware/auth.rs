use super::Handler;
use crate::context::Context;

/// Rejects requests whose `Authorization` header is not the configured token.
///
/// Mounted on a group, it guards every route registered below it:
///
/// ```rust
/// use cweb::{middleware::AuthMiddleware, Context, Engine};
///
/// let mut engine = Engine::new();
/// let mut admin = engine.group("/admin");
/// admin.use_middleware(AuthMiddleware::new("Bearer s3cret".to_string()));
/// admin.get("/stats", |c: &mut Context| c.string(200, "ok"));
/// ```
pub struct AuthMiddleware {
    token: String,
}

impl AuthMiddleware {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

impl Handler for AuthMiddleware {
    fn handle(&self, c: &mut Context) {
        if c.header("authorization") == self.token {
            c.next();
        } else {
            c.abort(401, "Unauthorized");
        }
    }
}
