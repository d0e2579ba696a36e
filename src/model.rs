use serde::Deserialize;

/// Currency unit names drive both column formatting and the amount-in-words
/// clause ("DOLLAR"/"CENT", "RUPEE"/"PAISA").
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Currency {
    pub code: String,
    pub major: String,
    pub minor: String,
}

impl Currency {
    pub fn usd() -> Self {
        Currency {
            code: "USD".into(),
            major: "DOLLAR".into(),
            minor: "CENT".into(),
        }
    }

    pub fn inr() -> Self {
        Currency {
            code: "INR".into(),
            major: "RUPEE".into(),
            minor: "PAISA".into(),
        }
    }

    pub fn eur() -> Self {
        Currency {
            code: "EUR".into(),
            major: "EURO".into(),
            minor: "CENT".into(),
        }
    }
}

/// A joined party record (exporter, consignee, manufacturer, bank, …).
/// The caller resolves foreign keys before handing the record over; a party
/// that could not be resolved arrives as `None` on the enclosing record.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tax_id: Option<String>,
}

impl Party {
    /// Multi-line display form fed to the labeled-box renderer.
    pub fn display(&self) -> String {
        let mut out = self.name.clone();
        if !self.address.is_empty() {
            out.push('\n');
            out.push_str(&self.address);
        }
        if let Some(country) = &self.country {
            out.push('\n');
            out.push_str(country);
        }
        if let Some(tax_id) = &self.tax_id {
            out.push('\n');
            out.push_str(tax_id);
        }
        out
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(default)]
    pub hs_code: Option<String>,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub rate: f64,
}

fn default_unit() -> String {
    "PCS".into()
}

impl LineItem {
    pub fn amount(&self) -> f64 {
        self.quantity * self.rate
    }
}

/// Document-level adjustments applied after the line subtotal.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Charges {
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub freight: f64,
    #[serde(default)]
    pub insurance: f64,
    /// Percentage applied to (subtotal − discount).
    #[serde(default)]
    pub tax_percent: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub date: String,
    pub exporter: Option<Party>,
    pub consignee: Option<Party>,
    #[serde(default)]
    pub buyer: Option<Party>,
    #[serde(default)]
    pub bank: Option<Party>,
    #[serde(default)]
    pub port_of_loading: Option<String>,
    #[serde(default)]
    pub port_of_discharge: Option<String>,
    #[serde(default)]
    pub final_destination: Option<String>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    #[serde(default)]
    pub delivery_terms: Option<String>,
    pub currency: Currency,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub charges: Charges,
    #[serde(default)]
    pub declaration: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PurchaseOrder {
    pub number: String,
    pub date: String,
    pub buyer: Option<Party>,
    pub supplier: Option<Party>,
    #[serde(default)]
    pub ship_to: Option<Party>,
    #[serde(default)]
    pub delivery_date: Option<String>,
    #[serde(default)]
    pub payment_terms: Option<String>,
    pub currency: Currency,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub charges: Charges,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// Customs export annexure accompanying an invoice; checked against the
/// shipping bill by the examining officer.
#[derive(Clone, Debug, Deserialize)]
pub struct Annexure {
    pub invoice_number: String,
    pub invoice_date: String,
    pub exporter: Option<Party>,
    pub manufacturer: Option<Party>,
    #[serde(default)]
    pub iec_code: Option<String>,
    #[serde(default)]
    pub examination_place: Option<String>,
    #[serde(default)]
    pub examination_date: Option<String>,
    pub currency: Currency,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub packages: u32,
    #[serde(default)]
    pub net_weight_kg: f64,
    #[serde(default)]
    pub gross_weight_kg: f64,
    #[serde(default)]
    pub seal_number: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VgmCertificate {
    pub booking_number: String,
    pub date: String,
    pub shipper: Option<Party>,
    pub container_number: String,
    #[serde(default = "default_container_size")]
    pub container_size: String,
    pub cargo_weight_kg: f64,
    pub tare_weight_kg: f64,
    /// SOLAS method: "Method 1" (weighbridge) or "Method 2" (calculation).
    #[serde(default = "default_vgm_method")]
    pub method: String,
    #[serde(default)]
    pub weighbridge: Option<String>,
    #[serde(default)]
    pub weighing_date: Option<String>,
    pub authorized_person: String,
    #[serde(default)]
    pub designation: Option<String>,
}

fn default_container_size() -> String {
    "40'".into()
}

fn default_vgm_method() -> String {
    "Method 1".into()
}

impl VgmCertificate {
    pub fn verified_gross_mass_kg(&self) -> f64 {
        self.cargo_weight_kg + self.tare_weight_kg
    }
}

/// The fully-resolved record handed to the engine. Immutable during
/// rendering; the variant selects the document assembler.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentRecord {
    Invoice(Invoice),
    PurchaseOrder(PurchaseOrder),
    Annexure(Annexure),
    Vgm(VgmCertificate),
}

impl DocumentRecord {
    /// Human-readable document number, used for the output filename.
    pub fn number(&self) -> &str {
        match self {
            DocumentRecord::Invoice(inv) => &inv.number,
            DocumentRecord::PurchaseOrder(po) => &po.number,
            DocumentRecord::Annexure(ann) => &ann.invoice_number,
            DocumentRecord::Vgm(vgm) => &vgm.booking_number,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DocumentRecord::Invoice(_) => "invoice",
            DocumentRecord::PurchaseOrder(_) => "purchase_order",
            DocumentRecord::Annexure(_) => "annexure",
            DocumentRecord::Vgm(_) => "vgm",
        }
    }
}

/// Raw image bytes fetched by the caller. Absence of any asset never blocks
/// a render; the decoration is skipped with a warning.
#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub letterhead: Option<Vec<u8>>,
    pub signature: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderConfig {
    /// Turn the lenient fallbacks for malformed dates/numbers into errors.
    pub strict: bool,
}
