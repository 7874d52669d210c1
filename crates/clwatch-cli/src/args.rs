//! Search arguments shared by the `url` and `watch` subcommands.
//!
//! The option lists handed to the resolver are built explicitly from the
//! parsed fields; only options the user actually passed become entries.

use clap::Args;

use clwatch_core::search::category_code;
use clwatch_core::{resolve_options, SearchRequest, StaticOption, VarOption};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// City / geographical area subdomain (e.g. denver)
    pub city: String,

    /// Vehicle type: cars-trucks or motorcycles
    pub vehicle_type: String,

    /// Seller type: all, dealer, or owner
    pub seller_type: String,

    /// Free-text make/model search term
    #[arg(long, default_value = "")]
    pub query: String,

    /// Only listings accepting cryptocurrency
    #[arg(long)]
    pub crypto: bool,

    /// Only listings posted today
    #[arg(long)]
    pub posted_today: bool,

    /// Bundle duplicate listings
    #[arg(long)]
    pub bundled_duplicates: bool,

    /// Only listings with images
    #[arg(long)]
    pub has_images: bool,

    /// Match the search term against titles only
    #[arg(long)]
    pub titles_only: bool,

    /// Vehicle condition (new, like new, excellent, good, fair, salvage)
    #[arg(long)]
    pub condition: Option<String>,

    /// Cylinder count (3, 4, 5, 6, 8, 10, 12, other)
    #[arg(long)]
    pub cylinders: Option<String>,

    /// Drivetrain (fwd, rwd, 4wd)
    #[arg(long)]
    pub drive: Option<String>,

    /// Fuel type (gas, diesel, hybrid, electric, other)
    #[arg(long)]
    pub fuel: Option<String>,

    /// Paint color
    #[arg(long)]
    pub color: Option<String>,

    /// Vehicle size (compact, full-size, mid-size, sub-compact)
    #[arg(long)]
    pub size: Option<String>,

    /// Title status (clean, salvage, rebuilt, parts-only, lien, missing)
    #[arg(long = "title-status")]
    pub title_status: Option<String>,

    /// Transmission (manual, automatic, other)
    #[arg(long)]
    pub transmission: Option<String>,

    /// Body type (sedan, coupe, pickup, SUV, ...)
    #[arg(long = "type")]
    pub body_type: Option<String>,

    /// Search radius in miles
    #[arg(long)]
    pub search_distance: Option<String>,

    /// Postal code anchoring the search radius
    #[arg(long)]
    pub postal_code: Option<String>,

    /// Minimum price
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum price
    #[arg(long)]
    pub max_price: Option<String>,

    /// Minimum model year
    #[arg(long)]
    pub min_auto_year: Option<String>,

    /// Maximum model year
    #[arg(long)]
    pub max_auto_year: Option<String>,

    /// Minimum odometer miles
    #[arg(long)]
    pub min_miles: Option<String>,

    /// Maximum odometer miles
    #[arg(long)]
    pub max_miles: Option<String>,
}

impl SearchArgs {
    /// Resolve the category code, validate the request, and compose the feed
    /// URL.
    ///
    /// # Errors
    ///
    /// Returns [`clwatch_core::SearchError`] for a blank city or an unknown
    /// vehicle/seller pair.
    pub fn build_url(&self) -> Result<String, clwatch_core::SearchError> {
        let category = category_code(&self.vehicle_type, &self.seller_type)?;
        let request = SearchRequest::new(&self.city, category, &self.query)?;
        let fragments = resolve_options(&self.static_options(), &self.var_options());
        Ok(request.url(&fragments))
    }

    fn static_options(&self) -> Vec<StaticOption> {
        let flags = [
            ("crypto", self.crypto),
            ("posted_today", self.posted_today),
            ("bundled_duplicates", self.bundled_duplicates),
            ("has_images", self.has_images),
            ("titles_only", self.titles_only),
        ];
        let choices = [
            ("condition", &self.condition),
            ("cylinders", &self.cylinders),
            ("drive", &self.drive),
            ("fuel", &self.fuel),
            ("color", &self.color),
            ("size", &self.size),
            ("title-status", &self.title_status),
            ("transmission", &self.transmission),
            ("type", &self.body_type),
        ];

        let mut options = Vec::new();
        for (name, set) in flags {
            if set {
                options.push(StaticOption::Flag(name.to_owned()));
            }
        }
        for (group, value) in choices {
            if let Some(value) = value {
                options.push(StaticOption::Choice {
                    group: group.to_owned(),
                    value: value.clone(),
                });
            }
        }
        options
    }

    fn var_options(&self) -> Vec<VarOption> {
        let ranges = [
            ("search_distance", &self.search_distance),
            ("postal_code", &self.postal_code),
            ("min_price", &self.min_price),
            ("max_price", &self.max_price),
            ("min_auto_year", &self.min_auto_year),
            ("max_auto_year", &self.max_auto_year),
            ("min_miles", &self.min_miles),
            ("max_miles", &self.max_miles),
        ];

        ranges
            .into_iter()
            .filter_map(|(name, amount)| {
                amount.as_ref().map(|amount| VarOption::new(name, amount))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "args_test.rs"]
mod tests;
