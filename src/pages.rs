use minijinja::{context, Environment, Error as TemplateError};

const INDEX_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Renders the HTML shell served at `/`
#[derive(Debug)]
pub struct PageRenderer {
    env: Environment<'static>,
    token: String,
}

impl PageRenderer {
    pub fn new(token: impl Into<String>) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template(INDEX_NAME, INDEX_TEMPLATE)?;
        Ok(Self {
            env,
            token: token.into(),
        })
    }

    pub fn render_index(&self) -> Result<String, TemplateError> {
        let template = self.env.get_template(INDEX_NAME)?;
        template.render(context! { token => &self.token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injects_token() {
        let pages = PageRenderer::new("shell-token").unwrap();
        let html = pages.render_index().unwrap();
        assert!(html.contains(r#"data-token="shell-token""#));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn escapes_token() {
        let pages = PageRenderer::new("<b>").unwrap();
        let html = pages.render_index().unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn script_token_is_a_json_string() {
        let pages = PageRenderer::new(r#"a"b"#).unwrap();
        let html = pages.render_index().unwrap();
        assert!(html.contains(r#"window.token = "a\"b";"#));
        assert!(!html.contains("window.token = \"a&quot;"));
    }
}
