//! Create/edit form for a restaurant.
//!
//! The form keeps flat input fields, separate from the nested record shape.
//! Loading a record flattens its attribute bag; submitting maps the fields back
//! into a [`RestaurantPayload`].

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{
    Acknowledgement, ParkingFlags, ParkingKind, PriceRange, Restaurant, RestaurantId,
    RestaurantPayload, WifiTier,
};

/// Maximum length of the state code.
pub const STATE_MAX_LEN: usize = 2;

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RestaurantId),
}

/// Flat input fields.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub categories: String,
    pub price_range: PriceRange,
    pub wifi: WifiTier,
    pub parking: ParkingFlags,
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            categories: String::new(),
            price_range: PriceRange::Inexpensive,
            wifi: WifiTier::No,
            parking: ParkingFlags::default(),
        }
    }
}

impl RestaurantForm {
    /// Flatten a record into form fields.
    ///
    /// Parking is decoded strictly; the decode error is returned alongside a
    /// form that falls back to no parking.
    pub fn from_record(restaurant: &Restaurant) -> (Self, Option<AppError>) {
        let attrs = &restaurant.attributes;
        let (parking, parking_error) = match attrs.parking_flags() {
            Ok(flags) => (flags.unwrap_or_default(), None),
            Err(e) => (ParkingFlags::default(), Some(e)),
        };

        let form = Self {
            name: restaurant.name.clone(),
            address: restaurant.address.clone(),
            city: restaurant.city.clone(),
            state: restaurant.state.clone(),
            categories: restaurant.categories.clone().unwrap_or_default(),
            price_range: attrs.price_tier().unwrap_or_default(),
            wifi: attrs.wifi.unwrap_or_default(),
            parking,
        };
        (form, parking_error)
    }

    /// Check the required fields.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("Name", &self.name),
            ("Address", &self.address),
            ("City", &self.city),
            ("State", &self.state),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", label)));
            }
        }
        if self.state.trim().chars().count() > STATE_MAX_LEN {
            return Err(AppError::Validation(format!(
                "State must be at most {} characters",
                STATE_MAX_LEN
            )));
        }
        Ok(())
    }

    /// Map the flat fields back into the record shape.
    pub fn to_payload(&self) -> RestaurantPayload {
        RestaurantPayload {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            categories: self.categories.trim().to_string(),
            price_range: self.price_range,
            wifi: self.wifi,
            parking: self.parking,
        }
    }

    /// Set one field from user input.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        match key.trim() {
            "name" => self.name = value.to_string(),
            "address" => self.address = value.to_string(),
            "city" => self.city = value.to_string(),
            "state" => {
                if value.trim().chars().count() > STATE_MAX_LEN {
                    return Err(AppError::Validation(format!(
                        "State must be at most {} characters",
                        STATE_MAX_LEN
                    )));
                }
                self.state = value.trim().to_string();
            }
            "categories" => self.categories = value.to_string(),
            "price_range" | "price" => {
                self.price_range = PriceRange::from_str(value).ok_or_else(|| {
                    AppError::Validation(format!("Price range must be 1-4, got {:?}", value))
                })?;
            }
            "wifi" => {
                self.wifi = WifiTier::from_str(value).ok_or_else(|| {
                    AppError::Validation(format!("WiFi must be no, free or paid, got {:?}", value))
                })?;
            }
            other => {
                return Err(AppError::Validation(format!("Unknown field {:?}", other)));
            }
        }
        Ok(())
    }
}

/// An open form: fields plus submission status.
#[derive(Debug, Clone)]
pub struct FormEditor {
    pub mode: FormMode,
    pub form: RestaurantForm,
    /// Last save failure, shown inside the form
    pub error: Option<String>,
    /// Non-fatal problem found while loading the record
    pub warning: Option<String>,
    pub submitting: bool,
}

impl FormEditor {
    pub fn new(mode: FormMode, form: RestaurantForm) -> Self {
        Self {
            mode,
            form,
            error: None,
            warning: None,
            submitting: false,
        }
    }

    /// Empty form for a new restaurant.
    pub fn create() -> Self {
        Self::new(FormMode::Create, RestaurantForm::default())
    }

    /// Form pre-filled from `restaurant`.
    pub fn edit(restaurant: &Restaurant) -> Self {
        let (form, parking_error) = RestaurantForm::from_record(restaurant);
        let warning = parking_error.map(|e| {
            tracing::warn!(id = %restaurant.id, "Error parsing parking data: {}", e);
            format!("{}; parking options were reset", e)
        });

        Self {
            warning,
            ..Self::new(FormMode::Edit(restaurant.id.clone()), form)
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Restaurant",
            FormMode::Edit(_) => "Edit Restaurant",
        }
    }

    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.form.set_field(key, value)
    }

    pub fn toggle_parking(&mut self, kind: ParkingKind) {
        self.form.parking.toggle(kind);
    }

    /// Validate and send the form. On failure the message is kept in
    /// [`error`](Self::error) and the form stays usable.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<Acknowledgement, AppError> {
        self.error = None;
        if let Err(e) = self.form.validate() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.submitting = true;
        let payload = self.form.to_payload();
        let result = match &self.mode {
            FormMode::Create => api.create(&payload).await,
            FormMode::Edit(id) => api.update(id, &payload).await,
        };
        self.submitting = false;

        if let Err(e) = &result {
            tracing::error!("Saving restaurant failed: {}", e);
            self.error = Some(e.to_string());
        }
        result
    }

    /// Text rendering of the form.
    pub fn render(&self) -> String {
        let f = &self.form;
        let parking = ParkingKind::ALL
            .iter()
            .map(|kind| {
                format!(
                    "[{}] {}",
                    if f.parking.get(*kind) { "x" } else { " " },
                    kind.label()
                )
            })
            .collect::<Vec<_>>()
            .join("  ");

        let mut lines = vec![self.title().to_string()];
        if let Some(warning) = &self.warning {
            lines.push(format!("warning: {}", warning));
        }
        if let Some(error) = &self.error {
            lines.push(format!("error: {}", error));
        }
        lines.extend([
            format!("  name:        {}", f.name),
            format!("  address:     {}", f.address),
            format!("  city:        {}", f.city),
            format!("  state:       {}", f.state),
            format!("  categories:  {}", f.categories),
            format!("  price_range: {}", f.price_range.label()),
            format!("  wifi:        {}", f.wifi.label()),
            format!("  parking:     {}", parking),
        ]);
        lines.join("\n")
    }
}
