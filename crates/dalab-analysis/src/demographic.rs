//! Summary statistics over the census extract (`adult.data.csv`).
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DemographicConfig;
use crate::error::{StatsError, StatsResult};
use crate::stats::{percentage, round_to, value_counts};

/// One row of the census extract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Person {
    pub age: u32,
    #[serde(default)]
    pub workclass: String,
    #[serde(default)]
    pub fnlwgt: u64,
    pub education: String,
    #[serde(default)]
    pub education_num: u32,
    #[serde(default)]
    pub marital_status: String,
    pub occupation: String,
    #[serde(default)]
    pub relationship: String,
    pub race: String,
    pub sex: String,
    #[serde(default)]
    pub capital_gain: i64,
    #[serde(default)]
    pub capital_loss: i64,
    pub hours_per_week: u32,
    pub native_country: String,
    pub salary: String,
}

/// Answers to the demographic questions. Percentages are rounded to one
/// decimal place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicReport {
    /// People per race, most frequent first.
    pub race_count: Vec<(String, usize)>,
    pub average_age_men: f64,
    pub percentage_bachelors: f64,
    /// Share of high earners among people with advanced education.
    pub higher_education_rich: f64,
    /// Share of high earners among everybody else.
    pub lower_education_rich: f64,
    pub min_work_hours: u32,
    /// Share of high earners among people working `min_work_hours`.
    pub rich_percentage: f64,
    pub highest_earning_country: String,
    pub highest_earning_country_percentage: f64,
    pub country_of_interest: String,
    /// Most common occupation of high earners from `country_of_interest`.
    pub top_in_occupation: Option<String>,
}

/// Answer the demographic questions for `people`.
///
/// # Errors
///
/// [`StatsError::EmptyData`] when `people` is empty.
pub fn calculate_demographic_data(
    people: &[Person],
    config: &DemographicConfig,
) -> StatsResult<DemographicReport> {
    if people.is_empty() {
        return Err(StatsError::empty("demographic report"));
    }
    let is_rich = |p: &Person| p.salary == config.rich_label;
    let is_advanced = |p: &Person| config.advanced_education.iter().any(|e| *e == p.education);

    let race_count = value_counts(people.iter().map(|p| p.race.clone()));

    let men_ages: Vec<f64> = people
        .iter()
        .filter(|p| p.sex == config.male_label)
        .map(|p| p.age as f64)
        .collect();
    let average_age_men = if men_ages.is_empty() {
        log::warn!("No rows with sex '{}'", config.male_label);
        0.0
    } else {
        round_to(men_ages.iter().sum::<f64>() / men_ages.len() as f64, 1)
    };

    let percentage_bachelors = round_to(
        percentage(people.iter().map(|p| p.education == config.bachelors_label)),
        1,
    );

    let higher_education_rich = round_to(
        percentage(people.iter().filter(|p| is_advanced(*p)).map(|p| is_rich(p))),
        1,
    );
    let lower_education_rich = round_to(
        percentage(people.iter().filter(|p| !is_advanced(*p)).map(|p| is_rich(p))),
        1,
    );

    // non-empty input, so a minimum exists
    let min_work_hours = people.iter().map(|p| p.hours_per_week).min().unwrap_or(0);
    let rich_percentage = round_to(
        percentage(
            people
                .iter()
                .filter(|p| p.hours_per_week == min_work_hours)
                .map(|p| is_rich(p)),
        ),
        1,
    );

    let mut by_country: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for person in people {
        let entry = by_country.entry(person.native_country.as_str()).or_default();
        entry.0 += is_rich(person) as usize;
        entry.1 += 1;
    }
    let (highest_earning_country, highest_share) = by_country
        .iter()
        .map(|(country, &(rich, total))| (*country, rich as f64 / total as f64 * 100.0))
        .fold(None::<(&str, f64)>, |best, (country, share)| match best {
            Some((_, best_share)) if best_share >= share => best,
            _ => Some((country, share)),
        })
        .ok_or_else(|| StatsError::empty("country grouping"))?;

    let top_in_occupation = value_counts(
        people
            .iter()
            .filter(|p| p.native_country == config.country_of_interest && is_rich(*p))
            .map(|p| p.occupation.clone()),
    )
    .into_iter()
    .next()
    .map(|(occupation, _)| occupation);

    let report = DemographicReport {
        race_count,
        average_age_men,
        percentage_bachelors,
        higher_education_rich,
        lower_education_rich,
        min_work_hours,
        rich_percentage,
        highest_earning_country: highest_earning_country.to_string(),
        highest_earning_country_percentage: round_to(highest_share, 1),
        country_of_interest: config.country_of_interest.clone(),
        top_in_occupation,
    };
    log::debug!("Demographic report over {} rows: {:?}", people.len(), report);
    Ok(report)
}

impl fmt::Display for DemographicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of each race:")?;
        for (race, count) in &self.race_count {
            writeln!(f, "  {:<24}{}", race, count)?;
        }
        writeln!(f, "\nAverage age of men: {}", self.average_age_men)?;
        writeln!(f, "\nPercentage with Bachelors degrees: {}%", self.percentage_bachelors)?;
        writeln!(
            f,
            "\nPercentage with higher education that earn >50K: {}%",
            self.higher_education_rich
        )?;
        writeln!(
            f,
            "\nPercentage without higher education that earn >50K: {}%",
            self.lower_education_rich
        )?;
        writeln!(f, "\nMin work time: {} hours/week", self.min_work_hours)?;
        writeln!(
            f,
            "\nPercentage of rich among those who work fewest hours: {}%",
            self.rich_percentage
        )?;
        writeln!(
            f,
            "\nCountry with highest percentage of rich: {}",
            self.highest_earning_country
        )?;
        writeln!(
            f,
            "\nHighest percentage of rich people in country: {}%",
            self.highest_earning_country_percentage
        )?;
        write!(
            f,
            "\nTop occupations in {}: {}",
            self.country_of_interest,
            self.top_in_occupation.as_deref().unwrap_or("n/a")
        )
    }
}
