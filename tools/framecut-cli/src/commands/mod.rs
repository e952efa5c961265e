pub mod config;
pub mod export;
pub mod replay;
pub mod resize;

use std::io::Write;

use serde_json::json;

use framecut_common::config::ServiceDescriptor;
use framecut_common::error::FramecutResult;
use framecut_editor_core::host::JsonLinesWriter;
use framecut_editor_core::services::{ExportService, ServiceRegistry};
use framecut_editor_model::export::ExportRequest;

/// Export service that prints each request as `{"export": ...}` instead of
/// rendering it.
pub struct PrintService<W: Write + Send> {
    descriptor: ServiceDescriptor,
    writer: JsonLinesWriter<W>,
}

impl<W: Write + Send> ExportService for PrintService<W> {
    fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    fn run(&self, request: ExportRequest) -> FramecutResult<()> {
        self.writer.write(&json!({ "export": request }))
    }
}

/// One printing service per configured descriptor, in config order.
pub fn print_registry<W: Write + Send + 'static>(
    descriptors: &[ServiceDescriptor],
    writer: &JsonLinesWriter<W>,
) -> ServiceRegistry {
    let services = descriptors
        .iter()
        .cloned()
        .map(|descriptor| {
            Box::new(PrintService {
                descriptor,
                writer: writer.clone(),
            }) as Box<dyn ExportService>
        })
        .collect();
    ServiceRegistry::new(services)
}
