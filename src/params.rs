//! Typed query options for each endpoint, and the checks run on them before a
//! request is built.
//!
//! Every field is optional and unset fields are never sent. String inputs
//! for enumerated values (`parameter`, `sort`, `include_fields`) are
//! normalized here, so a query that makes it through [`to_params`] is exactly
//! what goes on the wire.
//!
//! [`to_params`]: MeasurementsQuery::to_params

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::util::{QueryParams, has_date_shape, is_coordinate_pair};

/// Pollutant codes accepted by the `parameter` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pollutant {
    Pm25,
    Pm10,
    So2,
    No2,
    O3,
    Co,
    Bc,
}

impl Pollutant {
    pub const ALL: [Pollutant; 7] = [
        Pollutant::Pm25,
        Pollutant::Pm10,
        Pollutant::So2,
        Pollutant::No2,
        Pollutant::O3,
        Pollutant::Co,
        Pollutant::Bc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pollutant::Pm25 => "pm25",
            Pollutant::Pm10 => "pm10",
            Pollutant::So2 => "so2",
            Pollutant::No2 => "no2",
            Pollutant::O3 => "o3",
            Pollutant::Co => "co",
            Pollutant::Bc => "bc",
        }
    }
}

impl FromStr for Pollutant {
    type Err = Error;

    /// Case-insensitive: `PM25`, `Pm25` and `pm25` are the same code.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_lowercase();
        Pollutant::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| {
                Error::validation(
                    "parameter",
                    format!("must be one of {} (got `{}`)", joined(&Pollutant::ALL), s),
                )
            })
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(Error::validation(
                "sort",
                format!("must be one of asc, desc (got `{}`)", s),
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra fields `measurements` can be asked to include.
///
/// Only one may be requested per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeField {
    Attribution,
    AveragingPeriod,
    SourceName,
}

impl IncludeField {
    pub const ALL: [IncludeField; 3] = [
        IncludeField::Attribution,
        IncludeField::AveragingPeriod,
        IncludeField::SourceName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            IncludeField::Attribution => "attribution",
            IncludeField::AveragingPeriod => "averagingPeriod",
            IncludeField::SourceName => "sourceName",
        }
    }
}

impl FromStr for IncludeField {
    type Err = Error;

    // Exact match: the API's field names are camelCase.
    fn from_str(s: &str) -> Result<Self> {
        IncludeField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                Error::validation(
                    "include_fields",
                    format!("must be one of {} (got `{}`)", joined(&IncludeField::ALL), s),
                )
            })
    }
}

impl fmt::Display for IncludeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn joined<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn parameter(raw: Option<&str>) -> Result<Option<Pollutant>> {
    raw.map(str::parse).transpose()
}

fn date<'a>(field: &'static str, raw: Option<&'a str>) -> Result<Option<&'a str>> {
    match raw {
        Some(d) if !has_date_shape(d) => Err(Error::validation(
            field,
            format!("must look like YYYY-MM-DD (got `{}`)", d),
        )),
        other => Ok(other),
    }
}

fn finite(field: &'static str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(Error::validation(
            field,
            format!("must be a finite number (got `{}`)", v),
        )),
        _ => Ok(()),
    }
}

fn geo(coordinates: Option<&str>, radius: Option<u32>) -> Result<()> {
    match coordinates {
        Some(c) if !is_coordinate_pair(c) => Err(Error::validation(
            "coordinates",
            format!("must be a `lat,lon` pair (got `{}`)", c),
        )),
        None if radius.is_some() => Err(Error::validation(
            "radius",
            "can only be used together with `coordinates`",
        )),
        _ => Ok(()),
    }
}

/// Options for `/v1/cities`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitiesQuery {
    /// Passed through as-is; the server decides what a country code is.
    pub country: Option<String>,
}

impl CitiesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let mut q = QueryParams::new();
        q.push_opt("country", self.country.as_deref());
        Ok(q)
    }
}

/// Options for `/v1/latest`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatestQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    /// Pollutant code, any case.
    pub parameter: Option<String>,
    pub has_geo: Option<bool>,
    /// Center point as `lat,lon`.
    pub coordinates: Option<String>,
    /// Meters around `coordinates`.
    pub radius: Option<u32>,
}

impl LatestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn has_geo(mut self, has_geo: impl Into<bool>) -> Self {
        self.has_geo = Some(has_geo.into());
        self
    }

    pub fn coordinates(mut self, coordinates: impl Into<String>) -> Self {
        self.coordinates = Some(coordinates.into());
        self
    }

    pub fn radius(mut self, radius: impl Into<u32>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let parameter = parameter(self.parameter.as_deref())?;
        geo(self.coordinates.as_deref(), self.radius)?;

        let mut q = QueryParams::new();
        q.push_opt("city", self.city.as_deref());
        q.push_opt("country", self.country.as_deref());
        q.push_opt("location", self.location.as_deref());
        q.push_opt("parameter", parameter.map(Pollutant::as_str));
        q.push_opt("has_geo", self.has_geo);
        q.push_opt("coordinates", self.coordinates.as_deref());
        q.push_opt("radius", self.radius);
        Ok(q)
    }
}

/// Options for `/v1/locations`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationsQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub parameter: Option<String>,
    pub has_geo: Option<bool>,
}

impl LocationsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn has_geo(mut self, has_geo: impl Into<bool>) -> Self {
        self.has_geo = Some(has_geo.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let parameter = parameter(self.parameter.as_deref())?;

        let mut q = QueryParams::new();
        q.push_opt("city", self.city.as_deref());
        q.push_opt("country", self.country.as_deref());
        q.push_opt("location", self.location.as_deref());
        q.push_opt("parameter", parameter.map(Pollutant::as_str));
        q.push_opt("has_geo", self.has_geo);
        Ok(q)
    }
}

/// Options for `/v1/measurements`.
///
/// Rules checked by [`MeasurementsQuery::to_params`]:
/// - `parameter` must be a known pollutant code (any case).
/// - `value_from` / `value_to` need a `parameter` to be meaningful and are
///   rejected without one. They must be finite numbers.
/// - `date_from` / `date_to` must be `YYYY-MM-DD`-shaped (two `-`).
/// - `sort` must be `asc` or `desc` (any case).
/// - `include_fields` must be exactly one of `attribution`,
///   `averagingPeriod`, `sourceName`.
/// - `radius` requires `coordinates`, which must be a `lat,lon` pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementsQuery {
    pub city: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub parameter: Option<String>,
    pub has_geo: Option<bool>,
    pub coordinates: Option<String>,
    pub radius: Option<u32>,
    pub value_from: Option<f64>,
    pub value_to: Option<f64>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort: Option<String>,
    pub order_by: Option<String>,
    pub include_fields: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub skip: Option<u32>,
}

impl MeasurementsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn has_geo(mut self, has_geo: impl Into<bool>) -> Self {
        self.has_geo = Some(has_geo.into());
        self
    }

    pub fn coordinates(mut self, coordinates: impl Into<String>) -> Self {
        self.coordinates = Some(coordinates.into());
        self
    }

    pub fn radius(mut self, radius: impl Into<u32>) -> Self {
        self.radius = Some(radius.into());
        self
    }

    pub fn value_from(mut self, value_from: impl Into<f64>) -> Self {
        self.value_from = Some(value_from.into());
        self
    }

    pub fn value_to(mut self, value_to: impl Into<f64>) -> Self {
        self.value_to = Some(value_to.into());
        self
    }

    pub fn date_from(mut self, date_from: impl Into<String>) -> Self {
        self.date_from = Some(date_from.into());
        self
    }

    pub fn date_to(mut self, date_to: impl Into<String>) -> Self {
        self.date_to = Some(date_to.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn include_fields(mut self, include_fields: impl Into<String>) -> Self {
        self.include_fields = Some(include_fields.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<u32>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn page(mut self, page: impl Into<u32>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn skip(mut self, skip: impl Into<u32>) -> Self {
        self.skip = Some(skip.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let parameter = parameter(self.parameter.as_deref())?;
        if parameter.is_none() {
            if self.value_from.is_some() {
                return Err(Error::validation(
                    "value_from",
                    "requires `parameter` to be set",
                ));
            }
            if self.value_to.is_some() {
                return Err(Error::validation("value_to", "requires `parameter` to be set"));
            }
        }
        finite("value_from", self.value_from)?;
        finite("value_to", self.value_to)?;
        let date_from = date("date_from", self.date_from.as_deref())?;
        let date_to = date("date_to", self.date_to.as_deref())?;
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?;
        let include_fields = self
            .include_fields
            .as_deref()
            .map(str::parse::<IncludeField>)
            .transpose()?;
        geo(self.coordinates.as_deref(), self.radius)?;

        let mut q = QueryParams::new();
        q.push_opt("city", self.city.as_deref());
        q.push_opt("country", self.country.as_deref());
        q.push_opt("location", self.location.as_deref());
        q.push_opt("parameter", parameter.map(Pollutant::as_str));
        q.push_opt("has_geo", self.has_geo);
        q.push_opt("coordinates", self.coordinates.as_deref());
        q.push_opt("radius", self.radius);
        q.push_opt("value_from", self.value_from);
        q.push_opt("value_to", self.value_to);
        q.push_opt("date_from", date_from);
        q.push_opt("date_to", date_to);
        q.push_opt("sort", sort.map(SortOrder::as_str));
        q.push_opt("order_by", self.order_by.as_deref());
        q.push_opt("include_fields", include_fields.map(IncludeField::as_str));
        q.push_opt("limit", self.limit);
        q.push_opt("page", self.page);
        q.push_opt("skip", self.skip);
        Ok(q)
    }
}

/// Options for `/v1/parameters`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParametersQuery {
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

impl ParametersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let sort = self
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?;

        let mut q = QueryParams::new();
        q.push_opt("order_by", self.order_by.as_deref());
        q.push_opt("sort", sort.map(SortOrder::as_str));
        Ok(q)
    }
}

/// Options for `/v1/sources`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcesQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

impl SourcesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: impl Into<u32>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn page(mut self, page: impl Into<u32>) -> Self {
        self.page = Some(page.into());
        self
    }

    pub fn to_params(&self) -> Result<QueryParams> {
        let mut q = QueryParams::new();
        q.push_opt("limit", self.limit);
        q.push_opt("page", self.page);
        Ok(q)
    }
}
