use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::{
    config::HotelConfig,
    domain::{Booking, User},
    error::{AppError, Result},
};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

/// Projects a confirmed booking and its owner into a printable PDF.
pub struct InvoiceRenderer {
    hotel: HotelConfig,
}

impl InvoiceRenderer {
    pub fn new(hotel: HotelConfig) -> Self {
        Self { hotel }
    }

    /// The caller is responsible for ownership and status checks; a
    /// confirmed booking always carries its payment record.
    pub fn render(&self, booking: &Booking, user: &User) -> Result<Vec<u8>> {
        let payment = booking
            .payment
            .as_ref()
            .ok_or_else(|| AppError::Internal("Confirmed booking without payment".to_string()))?;

        let (doc, page, layer) = PdfDocument::new(
            format!("Invoice {}", booking.id),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Invoice",
        );

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Internal(format!("Font load failed: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Internal(format!("Font load failed: {}", e)))?;

        let mut page = InvoicePage::new(doc.get_page(page).get_layer(layer), regular, bold);

        // Issuer header
        page.title("HOTEL BOOKING INVOICE");
        page.centered(&self.hotel.name);
        page.centered(&self.hotel.address);
        page.centered(&format!("Phone: {}", self.hotel.phone));
        page.gap();

        // Invoice details
        page.heading(&format!("Invoice #: {}", booking.id));
        page.line(&format!("Date: {}", booking.created_at.format("%d %b %Y")));
        page.gap();

        // Customer details
        page.heading("Bill To:");
        page.line(&format!("Name: {}", user.name));
        page.line(&format!("Email: {}", user.email));
        page.line(&format!("Phone: {}", user.phone));
        page.gap();

        // Booking details
        page.heading("Booking Details:");
        page.line(&format!("Room Type: {}", booking.room_name));
        page.line(&format!("Check-in: {}", booking.check_in.format("%d %b %Y")));
        page.line(&format!("Check-out: {}", booking.check_out.format("%d %b %Y")));
        page.line(&format!("Number of Nights: {}", booking.nights));
        page.line(&format!("Number of Guests: {}", booking.guests));
        page.gap();

        // Payment breakdown
        page.heading("Payment Details:");
        page.line(&format!("Price per Night: Rs. {}", booking.price_per_night));
        page.line(&format!("Number of Nights: {}", booking.nights));
        page.line(&format!(
            "Subtotal: Rs. {}",
            booking.price_per_night * booking.nights
        ));
        page.gap();
        page.total(&format!("Total Amount: Rs. {}", booking.total_amount));
        page.gap();

        // Payment record
        page.line("Payment Status: PAID");
        page.line(&format!("Transaction ID: {}", payment.id));
        page.line(&format!("Payment Method: {}", payment.instrument.method_label()));
        page.line(&format!(
            "Payment Identifier: {}",
            payment.instrument.masked_display()
        ));
        page.line(&format!(
            "Payment Date: {}",
            payment.transaction_date.format("%d %b %Y")
        ));
        page.gap();

        page.centered("Thank you for choosing our hotel!");
        page.centered("We look forward to serving you.");

        doc.save_to_bytes()
            .map_err(|e| AppError::Internal(format!("PDF generation failed: {}", e)))
    }
}

/// Simple top-down text cursor over a single A4 layer.
struct InvoicePage {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_mm: f32,
}

impl InvoicePage {
    fn new(layer: PdfLayerReference, regular: IndirectFontRef, bold: IndirectFontRef) -> Self {
        Self {
            layer,
            regular,
            bold,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn title(&mut self, text: &str) {
        self.cursor_mm -= 10.0;
        self.layer
            .use_text(text, 24.0, Mm(45.0), Mm(self.cursor_mm), &self.bold);
        self.cursor_mm -= 10.0;
    }

    fn heading(&mut self, text: &str) {
        self.cursor_mm -= 7.0;
        self.layer
            .use_text(text, 12.0, Mm(MARGIN_MM), Mm(self.cursor_mm), &self.bold);
    }

    fn line(&mut self, text: &str) {
        self.cursor_mm -= 5.5;
        self.layer
            .use_text(text, 10.0, Mm(MARGIN_MM), Mm(self.cursor_mm), &self.regular);
    }

    fn total(&mut self, text: &str) {
        self.cursor_mm -= 8.0;
        self.layer
            .use_text(text, 14.0, Mm(MARGIN_MM), Mm(self.cursor_mm), &self.bold);
    }

    // Builtin Helvetica has no reliable width metrics here, so
    // "centered" is a fixed indent that reads centered for short lines.
    fn centered(&mut self, text: &str) {
        self.cursor_mm -= 5.5;
        self.layer
            .use_text(text, 10.0, Mm(70.0), Mm(self.cursor_mm), &self.regular);
    }

    fn gap(&mut self) {
        self.cursor_mm -= 5.0;
    }
}
