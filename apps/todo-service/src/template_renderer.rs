//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンでランディングページを生成する。
//!
//! テンプレートは `include_str!` でバイナリに埋め込む。
//! 構文エラーは起動時の [`TemplateRenderer::new`] で検出される。

use tera::{Context, Tera};

const HOME_TEMPLATE: &str = "home.html";

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 埋め込みテンプレートを登録してレンダラーを作成する
    pub fn new() -> Result<Self, tera::Error> {
        let mut engine = Tera::default();

        engine.add_raw_templates(vec![(
            HOME_TEMPLATE,
            include_str!("../templates/home.html"),
        )])?;

        Ok(Self { engine })
    }

    /// ランディングページを生成する
    pub fn render_home(&self) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("todo_path", "/todo");

        self.engine.render(HOME_TEMPLATE, &context)
    }
}
