use std::sync::Arc;

use crate::{config::Settings, invoice::InvoiceRenderer, service::ServiceContext};

#[derive(Clone)]
pub struct AppState {
    pub service_context: Arc<ServiceContext>,
    pub invoice_renderer: Arc<InvoiceRenderer>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(
        service_context: Arc<ServiceContext>,
        invoice_renderer: Arc<InvoiceRenderer>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            service_context,
            invoice_renderer,
            settings,
        }
    }
}
