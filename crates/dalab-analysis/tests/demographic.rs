//! Integration tests for the census demographic report.

use dalab_analysis::config::DemographicConfig;
use dalab_analysis::demographic::{calculate_demographic_data, Person};
use dalab_analysis::io::{read_csv_records_from_reader, CsvReaderConfig};
use dalab_analysis::StatsError;

const HEADER: &str = "age,workclass,fnlwgt,education,education-num,marital-status,occupation,\
relationship,race,sex,capital-gain,capital-loss,hours-per-week,native-country,salary";

// age, education, occupation, race, sex, hours, country, salary
const ROWS: &[(u32, &str, &str, &str, &str, u32, &str, &str)] = &[
    (39, "Bachelors", "Adm-clerical", "White", "Male", 40, "United-States", "<=50K"),
    (50, "Bachelors", "Exec-managerial", "White", "Male", 13, "United-States", "<=50K"),
    (38, "HS-grad", "Handlers-cleaners", "White", "Male", 40, "United-States", "<=50K"),
    (53, "11th", "Handlers-cleaners", "Black", "Male", 40, "United-States", "<=50K"),
    (28, "Bachelors", "Prof-specialty", "Black", "Female", 40, "Cuba", "<=50K"),
    (37, "Masters", "Exec-managerial", "White", "Female", 40, "United-States", ">50K"),
    (49, "9th", "Other-service", "Black", "Female", 16, "Jamaica", "<=50K"),
    (52, "HS-grad", "Exec-managerial", "White", "Male", 45, "United-States", ">50K"),
    (31, "Masters", "Prof-specialty", "Asian-Pac-Islander", "Female", 50, "India", ">50K"),
    (42, "Doctorate", "Prof-specialty", "Asian-Pac-Islander", "Male", 40, "India", ">50K"),
    (30, "Bachelors", "Tech-support", "Asian-Pac-Islander", "Male", 13, "India", ">50K"),
    (23, "Bachelors", "Adm-clerical", "White", "Female", 30, "United-States", "<=50K"),
];

fn census_csv() -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for (age, education, occupation, race, sex, hours, country, salary) in ROWS {
        csv.push_str(&format!(
            "{age}, Private, 77516, {education}, 13, Never-married, {occupation}, Not-in-family, \
             {race}, {sex}, 0, 0, {hours}, {country}, {salary}\n"
        ));
    }
    csv
}

fn people() -> Vec<Person> {
    read_csv_records_from_reader(census_csv().as_bytes(), &CsvReaderConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn census_rows_are_trimmed_and_typed() {
    let people = people();
    assert_eq!(people.len(), ROWS.len());
    assert_eq!(people[0].race, "White");
    assert_eq!(people[0].native_country, "United-States");
    assert_eq!(people[1].hours_per_week, 13);
    assert_eq!(people[8].salary, ">50K");
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[test]
fn report_answers() {
    let report = calculate_demographic_data(&people(), &DemographicConfig::default()).unwrap();

    assert_eq!(
        report.race_count,
        vec![
            ("White".to_string(), 6),
            ("Black".to_string(), 3),
            ("Asian-Pac-Islander".to_string(), 3),
        ]
    );
    assert_eq!(report.average_age_men, 43.4);
    assert_eq!(report.percentage_bachelors, 41.7);
    assert_eq!(report.higher_education_rich, 50.0);
    assert_eq!(report.lower_education_rich, 25.0);
    assert_eq!(report.min_work_hours, 13);
    assert_eq!(report.rich_percentage, 50.0);
    assert_eq!(report.highest_earning_country, "India");
    assert_eq!(report.highest_earning_country_percentage, 100.0);
    assert_eq!(report.top_in_occupation.as_deref(), Some("Prof-specialty"));
}

#[test]
fn country_ties_resolve_alphabetically() {
    let mut people = people();
    // a single high earner from a country sorting before India
    let mut extra = people[9].clone();
    extra.native_country = "Canada".to_string();
    people.push(extra);
    let report = calculate_demographic_data(&people, &DemographicConfig::default()).unwrap();
    assert_eq!(report.highest_earning_country, "Canada");
}

#[test]
fn missing_country_of_interest_has_no_top_occupation() {
    let config = DemographicConfig {
        country_of_interest: "Peru".to_string(),
        ..DemographicConfig::default()
    };
    let report = calculate_demographic_data(&people(), &config).unwrap();
    assert!(report.top_in_occupation.is_none());
    assert!(report.to_string().contains("Top occupations in Peru: n/a"));
}

#[test]
fn summary_text_lists_every_answer() {
    let report = calculate_demographic_data(&people(), &DemographicConfig::default()).unwrap();
    let text = report.to_string();
    assert!(text.contains("Average age of men: 43.4"));
    assert!(text.contains("Min work time: 13 hours/week"));
    assert!(text.contains("Country with highest percentage of rich: India"));
    assert!(text.contains("Top occupations in India: Prof-specialty"));
}

#[test]
fn report_serialises_to_json() {
    let report = calculate_demographic_data(&people(), &DemographicConfig::default()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["min_work_hours"], 13);
    assert_eq!(json["race_count"][0][0], "White");
}

#[test]
fn empty_census_is_an_error() {
    let err = calculate_demographic_data(&[], &DemographicConfig::default()).unwrap_err();
    assert!(matches!(err, StatsError::EmptyData { .. }));
}
