//! Page templates
//!
//! All pages are compiled into the binary and rendered with minijinja.
//! Template names keep the `.html` suffix so auto-escaping stays on.

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::response::ApiError;

/// Build the template environment with every page registered
pub fn build_environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("base.html", include_str!("base.html"))?;
    env.add_template("login.html", include_str!("login.html"))?;
    env.add_template("register.html", include_str!("register.html"))?;
    env.add_template("chat.html", include_str!("chat.html"))?;
    env.add_template("profile.html", include_str!("profile.html"))?;
    env.add_template("admin/dashboard.html", include_str!("admin/dashboard.html"))?;
    env.add_template("admin/users.html", include_str!("admin/users.html"))?;
    env.add_template("admin/monitor.html", include_str!("admin/monitor.html"))?;
    env.add_template("admin/report.html", include_str!("admin/report.html"))?;
    Ok(env)
}

/// Render a registered template to an HTML response
pub fn render(
    env: &Environment<'_>,
    name: &str,
    ctx: impl Serialize,
) -> Result<Html<String>, ApiError> {
    let template = env.get_template(name).map_err(ApiError::internal)?;
    let body = template.render(ctx).map_err(ApiError::internal)?;
    Ok(Html(body))
}
