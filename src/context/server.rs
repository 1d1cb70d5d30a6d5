//! Server-wide state shared by every document.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::DocumentUri;
use crate::config::AnalysisOptions;
use crate::diagnostics::DiagnosticComputer;

/// Kind of a configuration module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModuleType {
    CommonModule,
    ObjectModule,
    ManagerModule,
    FormModule,
    CommandModule,
    RecordSetModule,
    ValueManagerModule,
    SessionModule,
    ExternalConnectionModule,
    ManagedApplicationModule,
    OrdinaryApplicationModule,
    HttpServiceModule,
    WebServiceModule,
    #[default]
    Unknown,
}

/// A vendor configuration a module may be supported by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SupportConfiguration {
    pub name: SmolStr,
    pub version: SmolStr,
    pub provider: SmolStr,
}

/// How a module follows vendor support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SupportVariant {
    NotEditable,
    EditableSupportEnabled,
    NotSupported,
    None,
}

/// Project configuration: metadata known about modules by URI.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    module_types: FxHashMap<DocumentUri, ModuleType>,
    module_support: FxHashMap<DocumentUri, BTreeMap<SupportConfiguration, SupportVariant>>,
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module type of `uri`, `Unknown` when the module is not registered
    pub fn module_type(&self, uri: &DocumentUri) -> ModuleType {
        self.module_types.get(uri).copied().unwrap_or_default()
    }

    /// Support variants of `uri`, empty when not registered
    pub fn module_support(&self, uri: &DocumentUri) -> BTreeMap<SupportConfiguration, SupportVariant> {
        self.module_support.get(uri).cloned().unwrap_or_default()
    }

    pub fn set_module_type(&mut self, uri: DocumentUri, module_type: ModuleType) {
        self.module_types.insert(uri, module_type);
    }

    pub fn set_module_support(
        &mut self,
        uri: DocumentUri,
        support: BTreeMap<SupportConfiguration, SupportVariant>,
    ) {
        self.module_support.insert(uri, support);
    }
}

/// State shared by all document contexts of one server.
pub struct ServerContext {
    options: AnalysisOptions,
    configuration: RwLock<Configuration>,
    diagnostic_computer: DiagnosticComputer,
}

impl ServerContext {
    pub fn new(options: AnalysisOptions) -> Self {
        let diagnostic_computer = DiagnosticComputer::new(&options);
        Self::with_diagnostic_computer(options, diagnostic_computer)
    }

    /// Create a context running a custom set of diagnostic rules
    pub fn with_diagnostic_computer(
        options: AnalysisOptions,
        diagnostic_computer: DiagnosticComputer,
    ) -> Self {
        Self {
            options,
            configuration: RwLock::new(Configuration::new()),
            diagnostic_computer,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn diagnostic_computer(&self) -> &DiagnosticComputer {
        &self.diagnostic_computer
    }

    /// Replace the project configuration.
    ///
    /// Documents keep module metadata they already computed until rebuilt
    /// from scratch.
    pub fn set_configuration(&self, configuration: Configuration) {
        *self.configuration.write() = configuration;
    }

    /// Update the configuration in place
    pub fn update_configuration(&self, update: impl FnOnce(&mut Configuration)) {
        update(&mut self.configuration.write());
    }

    pub fn module_type(&self, uri: &DocumentUri) -> ModuleType {
        self.configuration.read().module_type(uri)
    }

    pub fn module_support(&self, uri: &DocumentUri) -> BTreeMap<SupportConfiguration, SupportVariant> {
        self.configuration.read().module_support(uri)
    }
}

impl Default for ServerContext {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

impl std::fmt::Debug for ServerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerContext")
            .field("options", &self.options)
            .field("configuration", &*self.configuration.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_module_defaults() {
        let server = ServerContext::default();
        let uri = DocumentUri::from("file:///CommonModule.bsl");
        assert_eq!(server.module_type(&uri), ModuleType::Unknown);
        assert!(server.module_support(&uri).is_empty());
    }

    #[test]
    fn test_registered_module_metadata() {
        let server = ServerContext::default();
        let uri = DocumentUri::from("file:///CommonModule.bsl");
        let support = SupportConfiguration {
            name: "БСП".into(),
            version: "3.1".into(),
            provider: "1C".into(),
        };

        server.update_configuration(|config| {
            config.set_module_type(uri.clone(), ModuleType::CommonModule);
            config.set_module_support(
                uri.clone(),
                BTreeMap::from([(support.clone(), SupportVariant::NotEditable)]),
            );
        });

        assert_eq!(server.module_type(&uri), ModuleType::CommonModule);
        assert_eq!(
            server.module_support(&uri).get(&support),
            Some(&SupportVariant::NotEditable)
        );
    }
}
