//! Page rendering with runtime templates.
//!
//! Templates are plain files in the template directory, looked up by name:
//! `index` resolves to `index.html`, `item` to `item.html`. They use
//! [MiniJinja](https://docs.rs/minijinja) syntax; the `.html` suffix turns on
//! HTML auto-escaping for every interpolated value.
//!
//! Rendering returns a [`RenderError`] instead of panicking or writing half a
//! page. The driver records the failure and carries on with the next page.
//!
//! ## Filters
//!
//! | Filter | Effect |
//! |---|---|
//! | `markdown` | Renders a string field as CommonMark HTML (`{{ description \| markdown }}`) |

use minijinja::value::Value;
use minijinja::{Environment, path_loader};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INDEX_TEMPLATE: &str = "index";
pub const ITEM_TEMPLATE: &str = "item";

const TEMPLATE_EXTENSION: &str = "html";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Named-template renderer bound to one template directory.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(template_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir.to_path_buf()));
        env.add_filter("markdown", markdown);
        Self { env }
    }

    /// Render the template called `name` against `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String, RenderError> {
        let template = self
            .env
            .get_template(&format!("{name}.{TEMPLATE_EXTENSION}"))?;
        Ok(template.render(context)?)
    }

    /// Render `name` and write the result to `destination`, replacing any
    /// existing file. Nothing is written if rendering fails.
    pub fn render_page<S: Serialize>(
        &self,
        name: &str,
        context: &S,
        destination: &Path,
    ) -> Result<(), RenderError> {
        let html = self.render(name, context)?;
        fs::write(destination, html).map_err(|source| RenderError::Write {
            path: destination.to_path_buf(),
            source,
        })
    }
}

fn markdown(text: &str) -> Value {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(text));
    Value::from_safe_string(out)
}
