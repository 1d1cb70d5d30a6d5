//! Document context construction helpers.

use std::sync::Arc;

use bsl::{AnalysisOptions, DocumentContext, DocumentUri, Language, ServerContext};

pub const BSL_URI: &str = "file:///src/CommonModules/Module/Ext/Module.bsl";
pub const OS_URI: &str = "file:///scripts/build.os";

/// Server with English messages and default rule selection.
pub fn english_server() -> Arc<ServerContext> {
    Arc::new(ServerContext::new(AnalysisOptions {
        language: Language::English,
        ..Default::default()
    }))
}

/// A `.bsl` document context.
pub fn bsl_document(source: &str) -> DocumentContext {
    DocumentContext::new(DocumentUri::from(BSL_URI), source, english_server())
}

/// A OneScript document context.
pub fn os_document(source: &str) -> DocumentContext {
    DocumentContext::new(DocumentUri::from(OS_URI), source, english_server())
}

/// A `.bsl` document context shared across threads.
pub fn shared_document(source: &str) -> Arc<DocumentContext> {
    Arc::new(bsl_document(source))
}
