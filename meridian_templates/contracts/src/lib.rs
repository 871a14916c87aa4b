use serde::Serialize;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TemplateService: Send + Sync + 'static {
    /// Render both representations of the given template.
    fn render<T: Template + 'static>(&self, template: &T) -> anyhow::Result<RenderedTemplate>;
}

#[cfg(feature = "mock")]
impl MockTemplateService {
    pub fn with_render<T: Template + Send + PartialEq + std::fmt::Debug + 'static>(
        mut self,
        template: T,
        result: anyhow::Result<RenderedTemplate>,
    ) -> Self {
        self.expect_render()
            .once()
            .with(mockall::predicate::eq(template))
            .return_once(|_| result);
        self
    }
}

/// A template with a plain text and an html variant. Html variants are
/// registered with autoescaping enabled.
pub trait Template: Serialize {
    const NAME: &'static str;
    const TEXT: &'static str;
    const HTML: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub text: String,
    pub html: String,
}

macro_rules! templates {
    ($( $ident:ident ( $path:literal ), )* ) => {
        $(
            impl Template for $ident {
                const NAME: &'static str = stringify!($ident);
                const TEXT: &'static str = include_str!(concat!("../templates/", $path, ".txt"));
                const HTML: &'static str = include_str!(concat!("../templates/", $path, ".html"));
            }
        )*

        /// `(name, text, html)` of every known template
        pub const TEMPLATES: &[(&str, &str, &str)] = &[
            $( ($ident::NAME, $ident::TEXT, $ident::HTML) ),*
        ];
    };
}

templates! {
    ContactInquiryTemplate("contact_inquiry"),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInquiryTemplate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
