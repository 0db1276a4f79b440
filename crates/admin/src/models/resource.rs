//! Remote API resources managed through the generic CRUD pages.
//!
//! Every entity screen (users, occasions, taxes, ...) is the same list /
//! detail / form page family parameterised by a [`Resource`]. The table here
//! fixes each resource's URL slug, API path, columns and form fields, and
//! which mutations the back-office may perform.

use core::fmt;

use serde_json::{Map, Value};

/// How a field is rendered in forms and coerced before it is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Number,
    Date,
    Flag,
}

impl FieldKind {
    /// HTML `input` type for the field.
    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text | Self::LongText => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::Flag => "checkbox",
        }
    }
}

/// One attribute of a resource record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// JSON key on the API record.
    pub key: &'static str,
    pub kind: FieldKind,
    /// Shown as a column on the list page.
    pub listed: bool,
    /// Present on the create/edit form.
    pub writable: bool,
}

impl Field {
    const fn new(key: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            kind,
            listed: true,
            writable: true,
        }
    }

    const fn text(key: &'static str) -> Self {
        Self::new(key, FieldKind::Text)
    }

    const fn number(key: &'static str) -> Self {
        Self::new(key, FieldKind::Number)
    }

    const fn date(key: &'static str) -> Self {
        Self::new(key, FieldKind::Date)
    }

    const fn flag(key: &'static str) -> Self {
        Self::new(key, FieldKind::Flag)
    }

    const fn email(key: &'static str) -> Self {
        Self::new(key, FieldKind::Email)
    }

    const fn long_text(key: &'static str) -> Self {
        Self::new(key, FieldKind::LongText).unlisted()
    }

    const fn unlisted(mut self) -> Self {
        self.listed = false;
        self
    }

    const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Translation key of the field's label.
    #[must_use]
    pub fn label_key(&self) -> String {
        format!("field-{}", self.key.replace('_', "-"))
    }
}

/// Mutations a resource supports from the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl Capabilities {
    const FULL: Self = Self {
        create: true,
        edit: true,
        delete: true,
    };

    const READ_ONLY: Self = Self {
        create: false,
        edit: false,
        delete: false,
    };

    const fn manage(edit: bool, delete: bool) -> Self {
        Self {
            create: false,
            edit,
            delete,
        }
    }
}

/// A resource exposed under `/admin/{api_path}` on the Hadawi API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Occasions,
    OccasionTypes,
    Payments,
    PromoCodes,
    Banners,
    Notifications,
    Withdrawals,
    DeliveryPartners,
    DeliveryRecords,
    Regions,
    Cities,
    Taxes,
    Packaging,
    Companies,
    Offers,
    Products,
    Categories,
    Brands,
}

const CREATED_AT: Field = Field::date("created_at").read_only();

const USERS: &[Field] = &[
    Field::text("name"),
    Field::email("email"),
    Field::text("phone"),
    Field::text("status"),
    CREATED_AT,
];

const OCCASIONS: &[Field] = &[
    Field::text("title"),
    Field::text("occasion_type").read_only(),
    Field::text("user").read_only(),
    Field::date("date"),
    Field::number("amount").read_only(),
    Field::text("status"),
];

const BILINGUAL_NAMED: &[Field] = &[
    Field::text("name_en"),
    Field::text("name_ar"),
    Field::flag("active"),
];

const PAYMENTS: &[Field] = &[
    Field::text("user").read_only(),
    Field::text("occasion").read_only(),
    Field::number("amount").read_only(),
    Field::text("method").read_only(),
    Field::text("status").read_only(),
    CREATED_AT,
];

const PROMO_CODES: &[Field] = &[
    Field::text("code"),
    Field::number("discount"),
    Field::date("expires_at"),
    Field::flag("active"),
];

const BANNERS: &[Field] = &[
    Field::text("title"),
    Field::text("image").unlisted(),
    Field::text("link"),
    Field::flag("active"),
];

const NOTIFICATIONS: &[Field] = &[Field::text("title"), Field::long_text("body"), CREATED_AT];

const WITHDRAWALS: &[Field] = &[
    Field::text("user").read_only(),
    Field::number("amount").read_only(),
    Field::text("iban").read_only(),
    Field::text("status"),
    CREATED_AT,
];

const CONTACTS: &[Field] = &[
    Field::text("name"),
    Field::email("email"),
    Field::text("phone"),
    Field::flag("active"),
];

const DELIVERY_RECORDS: &[Field] = &[
    Field::text("occasion").read_only(),
    Field::text("delivery_partner").read_only(),
    Field::text("status").read_only(),
    CREATED_AT,
];

const CITIES: &[Field] = &[
    Field::text("name_en"),
    Field::text("name_ar"),
    Field::number("region_id").unlisted(),
    Field::text("region").read_only(),
];

const TAXES: &[Field] = &[Field::text("name"), Field::number("rate"), Field::flag("active")];

const PRICED: &[Field] = &[Field::text("name"), Field::number("price"), Field::flag("active")];

const OFFERS: &[Field] = &[
    Field::text("title"),
    Field::number("company_id").unlisted(),
    Field::text("company").read_only(),
    Field::number("discount"),
    Field::date("expires_at"),
];

const PRODUCTS: &[Field] = &[
    Field::text("name"),
    Field::long_text("description"),
    Field::number("company_id").unlisted(),
    Field::number("category_id").unlisted(),
    Field::number("brand_id").unlisted(),
    Field::text("category").read_only(),
    Field::number("price"),
    Field::flag("active"),
];

impl Resource {
    pub const ALL: [Self; 19] = [
        Self::Users,
        Self::Occasions,
        Self::OccasionTypes,
        Self::Payments,
        Self::PromoCodes,
        Self::Banners,
        Self::Notifications,
        Self::Withdrawals,
        Self::DeliveryPartners,
        Self::DeliveryRecords,
        Self::Regions,
        Self::Cities,
        Self::Taxes,
        Self::Packaging,
        Self::Companies,
        Self::Offers,
        Self::Products,
        Self::Categories,
        Self::Brands,
    ];

    /// URL slug of the list page, e.g. `promo-codes` for `/promo-codes`.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Occasions => "occasions",
            Self::OccasionTypes => "occasion-types",
            Self::Payments => "payments",
            Self::PromoCodes => "promo-codes",
            Self::Banners => "banners",
            Self::Notifications => "notifications",
            Self::Withdrawals => "withdrawals",
            Self::DeliveryPartners => "delivery-partners",
            Self::DeliveryRecords => "delivery-records",
            Self::Regions => "regions",
            Self::Cities => "cities",
            Self::Taxes => "taxes",
            Self::Packaging => "packaging",
            Self::Companies => "companies",
            Self::Offers => "offers",
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Brands => "brands",
        }
    }

    /// Look a resource up by its URL slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.slug() == slug)
    }

    /// Path segment under `/admin/` on the remote API.
    #[must_use]
    pub const fn api_path(self) -> &'static str {
        self.slug()
    }

    /// The list page path, which is also the resource's menu path.
    #[must_use]
    pub fn list_path(self) -> String {
        format!("/{}", self.slug())
    }

    /// Translation key of the plural title (shared with the menu label).
    #[must_use]
    pub fn title_key(self) -> String {
        format!("nav-{}", self.slug())
    }

    /// Which mutations are allowed.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Payments | Self::DeliveryRecords => Capabilities::READ_ONLY,
            Self::Users | Self::Occasions => Capabilities::manage(true, true),
            Self::Withdrawals => Capabilities::manage(true, false),
            Self::Notifications => Capabilities {
                create: true,
                edit: false,
                delete: true,
            },
            _ => Capabilities::FULL,
        }
    }

    /// Fields in display order.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Users => USERS,
            Self::Occasions => OCCASIONS,
            Self::OccasionTypes | Self::Regions | Self::Categories => BILINGUAL_NAMED,
            Self::Payments => PAYMENTS,
            Self::PromoCodes => PROMO_CODES,
            Self::Banners => BANNERS,
            Self::Notifications => NOTIFICATIONS,
            Self::Withdrawals => WITHDRAWALS,
            Self::DeliveryPartners | Self::Companies => CONTACTS,
            Self::DeliveryRecords => DELIVERY_RECORDS,
            Self::Cities => CITIES,
            Self::Taxes => TAXES,
            Self::Packaging | Self::Brands => PRICED,
            Self::Offers => OFFERS,
            Self::Products => PRODUCTS,
        }
    }

    /// Columns on the list page.
    pub fn columns(self) -> impl Iterator<Item = &'static Field> {
        self.fields().iter().filter(|f| f.listed)
    }

    /// Inputs on the create/edit form.
    pub fn form_fields(self) -> impl Iterator<Item = &'static Field> {
        self.fields().iter().filter(|f| f.writable)
    }

    /// Turn submitted form values into the JSON body for the API.
    ///
    /// Only writable fields are sent. Numbers that parse are sent as JSON
    /// numbers, flags as booleans (an unchecked checkbox is absent from the
    /// form and becomes `false`), empty optional values as `null`.
    #[must_use]
    pub fn payload(self, form: &std::collections::HashMap<String, String>) -> Map<String, Value> {
        self.form_fields()
            .map(|field| {
                let raw = form.get(field.key).map_or("", |v| v.trim());
                let value = match field.kind {
                    FieldKind::Flag => Value::Bool(matches!(raw, "on" | "true" | "1")),
                    _ if raw.is_empty() => Value::Null,
                    FieldKind::Number => raw
                        .parse::<i64>()
                        .map(Value::from)
                        .or_else(|_| raw.parse::<f64>().map(Value::from))
                        .unwrap_or_else(|_| Value::String(raw.to_owned())),
                    _ => Value::String(raw.to_owned()),
                };
                (field.key.to_owned(), value)
            })
            .collect()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use serde_json::json;

    use super::*;

    #[test]
    fn test_slugs_are_unique_and_round_trip() {
        let slugs: HashSet<_> = Resource::ALL.iter().map(|r| r.slug()).collect();
        assert_eq!(slugs.len(), Resource::ALL.len());
        for resource in Resource::ALL {
            assert_eq!(Resource::from_slug(resource.slug()), Some(resource));
        }
        assert_eq!(Resource::from_slug("dashboard"), None);
    }

    #[test]
    fn test_every_resource_lists_something() {
        for resource in Resource::ALL {
            assert!(resource.columns().next().is_some(), "{resource}");
        }
    }

    #[test]
    fn test_read_only_resources() {
        assert_eq!(Resource::Payments.capabilities(), Capabilities::READ_ONLY);
        assert!(!Resource::DeliveryRecords.capabilities().edit);
        assert!(Resource::Taxes.capabilities().create);
    }

    #[test]
    fn test_label_keys() {
        let field = Resource::PromoCodes
            .fields()
            .iter()
            .find(|f| f.key == "expires_at")
            .unwrap();
        assert_eq!(field.label_key(), "field-expires-at");
        assert_eq!(Resource::PromoCodes.title_key(), "nav-promo-codes");
    }

    #[test]
    fn test_payload_coerces_values() {
        let form: HashMap<String, String> = [
            ("code", "EID25"),
            ("discount", "12.5"),
            ("expires_at", ""),
            ("ignored", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();

        let payload = Resource::PromoCodes.payload(&form);
        assert_eq!(
            Value::Object(payload),
            json!({
                "code": "EID25",
                "discount": 12.5,
                "expires_at": null,
                "active": false
            })
        );
    }

    #[test]
    fn test_payload_skips_read_only_fields() {
        let form: HashMap<String, String> = [("amount", "100"), ("status", "approved")]
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        let payload = Resource::Withdrawals.payload(&form);
        assert_eq!(Value::Object(payload), json!({ "status": "approved" }));
    }
}
