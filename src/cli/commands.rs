use anyhow::{anyhow, Context as _, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::context::{Context, H};
use crate::engine::Engine;
use crate::middleware::AuthMiddleware;

#[derive(Parser)]
#[command(name = "cweb")]
#[command(about = "cweb demo server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the demo application
    Serve {
        /// Address to listen on
        #[arg(long, env = "CWEB_ADDR", default_value = "127.0.0.1:9999")]
        addr: String,

        /// Directory of HTML templates
        #[arg(long)]
        templates: Option<PathBuf>,

        /// Directory served under /static
        #[arg(long = "static")]
        static_dir: Option<PathBuf>,

        /// Token required in the Authorization header for /admin routes
        #[arg(long, env = "CWEB_TOKEN")]
        token: Option<String>,
    },
    /// Print the demo application's routes
    Routes,
}

fn index(c: &mut Context) {
    c.string(200, "Hello cweb\n");
}

fn hello_query(c: &mut Context) {
    let body = format!("hello {}, you're at {}\n", c.query("name"), c.path());
    c.string(200, body);
}

fn hello_param(c: &mut Context) {
    let body = format!("hello {}, you're at {}\n", c.param("name"), c.path());
    c.string(200, body);
}

fn login(c: &mut Context) {
    let mut obj = H::new();
    obj.insert("username".to_string(), json!(c.post_form("username")));
    obj.insert("password".to_string(), json!(c.post_form("password")));
    c.json(200, &obj);
}

fn assets(c: &mut Context) {
    let filepath = c.param("filepath").to_string();
    c.json(200, &json!({ "filepath": filepath }));
}

#[allow(clippy::panic)]
fn panic_handler(_c: &mut Context) {
    panic!("deliberate panic from /panic");
}

fn page(c: &mut Context) {
    let name = format!("{}.html", c.param("name"));
    let data = json!({ "title": c.param("name"), "path": c.path() });
    c.html(200, &name, data);
}

fn admin(c: &mut Context) {
    c.json(200, &json!({ "admin": true }));
}

/// Build the demo application.
///
/// # Errors
///
/// Fails if `templates` is given but cannot be loaded.
pub fn demo_engine(
    templates: Option<&Path>,
    static_dir: Option<&Path>,
    token: Option<&str>,
) -> Result<Engine> {
    let mut engine = Engine::default_engine();
    engine
        .get("/", index)
        .get("/hello", hello_query)
        .get("/hello/:name", hello_param)
        .post("/login", login)
        .get("/assets/*filepath", assets)
        .get("/panic", panic_handler);

    engine.group("/v1").get("/hello/:name", hello_param);
    engine.group("/v2").post("/login", login);

    if let Some(dir) = templates {
        engine
            .load_templates(dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
        engine.get("/page/:name", page);
    }
    if let Some(dir) = static_dir {
        engine.static_files("/static", dir);
    }
    if let Some(token) = token {
        let mut group = engine.group("/admin");
        group.use_middleware(AuthMiddleware::new(token.to_string()));
        group.get("/dashboard", admin);
    }
    Ok(engine)
}

/// Run the parsed command line.
///
/// # Errors
///
/// Fails if the demo application cannot be built or the server cannot start.
pub fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve {
            addr,
            templates,
            static_dir,
            token,
        } => {
            let engine = demo_engine(templates.as_deref(), static_dir.as_deref(), token.as_deref())?;
            engine.dump_routes();
            let handle = engine
                .run(&addr)
                .with_context(|| format!("failed to start server on {addr}"))?;
            info!(addr = %handle.addr(), "Serving");
            handle
                .join()
                .map_err(|_| anyhow!("server coroutine panicked"))
        }
        Commands::Routes => {
            let engine = demo_engine(None, None, Some("token"))?;
            for (method, pattern) in engine.dispatcher().router().routes() {
                println!("{:<7} {pattern}", method.as_str());
            }
            Ok(())
        }
    }
}
