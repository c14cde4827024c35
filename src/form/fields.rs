use super::parse::parse_float;
use crate::{Error, Result, api::PredictionRequest, config::FormDefaults};
use std::{fmt, str::FromStr};
use tracing::debug;

pub const SOIL_TYPES: &[&str] = &["Sandy", "Loamy", "Clayey", "Black", "Red"];

pub const CROP_TYPES: &[&str] = &[
    "Rice",
    "Wheat",
    "Maize",
    "Sugarcane",
    "Cotton",
    "Soyabean",
    "Mungbean",
    "Tea",
    "Coffee",
    "Coconut",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    N,
    P,
    K,
    Temperature,
    Humidity,
    Moisture,
    SoilType,
    CropType,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::N,
        FormField::P,
        FormField::K,
        FormField::Temperature,
        FormField::Humidity,
        FormField::Moisture,
        FormField::SoilType,
        FormField::CropType,
    ];

    /// Field name as it appears in the request payload.
    pub fn name(self) -> &'static str {
        match self {
            FormField::N => "n",
            FormField::P => "p",
            FormField::K => "k",
            FormField::Temperature => "temperature",
            FormField::Humidity => "humidity",
            FormField::Moisture => "moisture",
            FormField::SoilType => "soil_type",
            FormField::CropType => "crop_type",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::N => "Nitrogen (N)",
            FormField::P => "Phosphorus (P)",
            FormField::K => "Potassium (K)",
            FormField::Temperature => "Temperature (°C)",
            FormField::Humidity => "Humidity (%)",
            FormField::Moisture => "Moisture (%)",
            FormField::SoilType => "Soil Type",
            FormField::CropType => "Crop Type",
        }
    }

    /// Preset options for categorical fields, `None` for numeric ones.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            FormField::SoilType => Some(SOIL_TYPES),
            FormField::CropType => Some(CROP_TYPES),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FormField::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::form(format!("unknown field '{}'", s)))
    }
}

/// Raw text of every form field, plus the defaults a reset returns to.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    values: [String; 8],
    defaults: [String; 8],
}

impl FormFields {
    pub fn from_defaults(defaults: &FormDefaults) -> Result<Self> {
        let defaults = [
            defaults.n.clone(),
            defaults.p.clone(),
            defaults.k.clone(),
            defaults.temperature.clone(),
            defaults.humidity.clone(),
            defaults.moisture.clone(),
            default_selection(FormField::SoilType, &defaults.soil_type)?,
            default_selection(FormField::CropType, &defaults.crop_type)?,
        ];

        Ok(Self {
            values: defaults.clone(),
            defaults,
        })
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.values[index(field)]
    }

    /// Updates a field. Categorical fields only accept their preset options;
    /// numeric text is kept as typed.
    pub fn set(&mut self, field: FormField, value: &str) -> Result<()> {
        let value = match field.options() {
            Some(options) => find_option(options, value).ok_or_else(|| {
                Error::form(format!(
                    "'{}' is not a valid {} (choose one of: {})",
                    value,
                    field.label(),
                    options.join(", ")
                ))
            })?,
            None => value.to_string(),
        };

        debug!("Form field {} set to {:?}", field, value);
        self.values[index(field)] = value;
        Ok(())
    }

    pub fn reset(&mut self) {
        debug!("Form reset to defaults");
        self.values = self.defaults.clone();
    }

    pub fn is_default(&self) -> bool {
        self.values == self.defaults
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            n: parse_float(self.get(FormField::N)),
            p: parse_float(self.get(FormField::P)),
            k: parse_float(self.get(FormField::K)),
            temperature: parse_float(self.get(FormField::Temperature)),
            humidity: parse_float(self.get(FormField::Humidity)),
            moisture: parse_float(self.get(FormField::Moisture)),
            soil_type: self.get(FormField::SoilType).to_string(),
            crop_type: self.get(FormField::CropType).to_string(),
        }
    }
}

fn index(field: FormField) -> usize {
    field as usize
}

fn find_option(options: &[&str], value: &str) -> Option<String> {
    let value = value.trim();
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(value))
        .map(|option| option.to_string())
}

fn default_selection(field: FormField, configured: &str) -> Result<String> {
    let options = field.options().unwrap_or_default();
    if configured.trim().is_empty() {
        return Ok(options.first().map(|o| o.to_string()).unwrap_or_default());
    }

    find_option(options, configured).ok_or_else(|| {
        Error::config(format!(
            "default {} '{}' is not one of: {}",
            field.name(),
            configured,
            options.join(", ")
        ))
    })
}
