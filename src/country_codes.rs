//! Country codes used by the world map, with the display names the GDP data is matched on.
//!
//! Codes are lowercase ISO 3166-1 alpha-2. A different code table can be supplied as a
//! two-column `code,name` CSV file.

use crate::error::{GdpError, Result};
use crate::table::read_csv_rows;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

static WORLD_COUNTRIES: Lazy<BTreeMap<String, String>> = Lazy::new(|| {
    COUNTRY_NAMES
        .iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
});

/// Built-in code -> name table for the world map
pub fn world_countries() -> BTreeMap<String, String> {
    WORLD_COUNTRIES.clone()
}

/// Read a code table from a delimited file. The first column holds the code and the
/// second the display name; codes are lowercased.
pub fn load_country_codes(path: &Path, separator: u8, quote: u8) -> Result<BTreeMap<String, String>> {
    let csv = read_csv_rows(path, separator, quote)?;
    let (code_col, name_col) = match csv.headers.as_slice() {
        [code, name, ..] => (code.clone(), name.clone()),
        _ => {
            return Err(GdpError::Config(format!(
                "country code file '{}' needs a code column and a name column",
                path.display()
            )))
        }
    };

    let mut codes = BTreeMap::new();
    for row in &csv.rows {
        match (row.get(&code_col), row.get(&name_col)) {
            (Some(code), Some(name)) if !code.trim().is_empty() => {
                codes.insert(code.trim().to_lowercase(), name.trim().to_string());
            }
            _ => debug!("Skipping incomplete country code row"),
        }
    }
    debug!("Loaded {} country codes from {}", codes.len(), path.display());
    Ok(codes)
}

const COUNTRY_NAMES: [(&str, &str); 184] = [
    ("ad", "Andorra"),
    ("ae", "United Arab Emirates"),
    ("af", "Afghanistan"),
    ("al", "Albania"),
    ("am", "Armenia"),
    ("ao", "Angola"),
    ("aq", "Antarctica"),
    ("ar", "Argentina"),
    ("at", "Austria"),
    ("au", "Australia"),
    ("az", "Azerbaijan"),
    ("ba", "Bosnia and Herzegovina"),
    ("bd", "Bangladesh"),
    ("be", "Belgium"),
    ("bf", "Burkina Faso"),
    ("bg", "Bulgaria"),
    ("bh", "Bahrain"),
    ("bi", "Burundi"),
    ("bj", "Benin"),
    ("bn", "Brunei Darussalam"),
    ("bo", "Bolivia, Plurinational State of"),
    ("br", "Brazil"),
    ("bt", "Bhutan"),
    ("bw", "Botswana"),
    ("by", "Belarus"),
    ("bz", "Belize"),
    ("ca", "Canada"),
    ("cd", "Congo, the Democratic Republic of the"),
    ("cf", "Central African Republic"),
    ("cg", "Congo"),
    ("ch", "Switzerland"),
    ("ci", "Cote d'Ivoire"),
    ("cl", "Chile"),
    ("cm", "Cameroon"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("cr", "Costa Rica"),
    ("cu", "Cuba"),
    ("cv", "Cape Verde"),
    ("cy", "Cyprus"),
    ("cz", "Czech Republic"),
    ("de", "Germany"),
    ("dj", "Djibouti"),
    ("dk", "Denmark"),
    ("do", "Dominican Republic"),
    ("dz", "Algeria"),
    ("ec", "Ecuador"),
    ("ee", "Estonia"),
    ("eg", "Egypt"),
    ("eh", "Western Sahara"),
    ("er", "Eritrea"),
    ("es", "Spain"),
    ("et", "Ethiopia"),
    ("fi", "Finland"),
    ("fr", "France"),
    ("ga", "Gabon"),
    ("gb", "United Kingdom"),
    ("ge", "Georgia"),
    ("gf", "French Guiana"),
    ("gh", "Ghana"),
    ("gl", "Greenland"),
    ("gm", "Gambia"),
    ("gn", "Guinea"),
    ("gq", "Equatorial Guinea"),
    ("gr", "Greece"),
    ("gt", "Guatemala"),
    ("gu", "Guam"),
    ("gw", "Guinea-Bissau"),
    ("gy", "Guyana"),
    ("hk", "Hong Kong"),
    ("hn", "Honduras"),
    ("hr", "Croatia"),
    ("ht", "Haiti"),
    ("hu", "Hungary"),
    ("id", "Indonesia"),
    ("ie", "Ireland"),
    ("il", "Israel"),
    ("in", "India"),
    ("iq", "Iraq"),
    ("ir", "Iran, Islamic Republic of"),
    ("is", "Iceland"),
    ("it", "Italy"),
    ("jm", "Jamaica"),
    ("jo", "Jordan"),
    ("jp", "Japan"),
    ("ke", "Kenya"),
    ("kg", "Kyrgyzstan"),
    ("kh", "Cambodia"),
    ("kp", "Korea, Democratic People's Republic of"),
    ("kr", "Korea, Republic of"),
    ("kw", "Kuwait"),
    ("kz", "Kazakhstan"),
    ("la", "Lao People's Democratic Republic"),
    ("lb", "Lebanon"),
    ("li", "Liechtenstein"),
    ("lk", "Sri Lanka"),
    ("lr", "Liberia"),
    ("ls", "Lesotho"),
    ("lt", "Lithuania"),
    ("lu", "Luxembourg"),
    ("lv", "Latvia"),
    ("ly", "Libyan Arab Jamahiriya"),
    ("ma", "Morocco"),
    ("mc", "Monaco"),
    ("md", "Moldova, Republic of"),
    ("me", "Montenegro"),
    ("mg", "Madagascar"),
    ("mk", "Macedonia, the former Yugoslav Republic of"),
    ("ml", "Mali"),
    ("mm", "Myanmar"),
    ("mn", "Mongolia"),
    ("mo", "Macao"),
    ("mr", "Mauritania"),
    ("mt", "Malta"),
    ("mu", "Mauritius"),
    ("mv", "Maldives"),
    ("mw", "Malawi"),
    ("mx", "Mexico"),
    ("my", "Malaysia"),
    ("mz", "Mozambique"),
    ("na", "Namibia"),
    ("ne", "Niger"),
    ("ng", "Nigeria"),
    ("ni", "Nicaragua"),
    ("nl", "Netherlands"),
    ("no", "Norway"),
    ("np", "Nepal"),
    ("nz", "New Zealand"),
    ("om", "Oman"),
    ("pa", "Panama"),
    ("pe", "Peru"),
    ("pg", "Papua New Guinea"),
    ("ph", "Philippines"),
    ("pk", "Pakistan"),
    ("pl", "Poland"),
    ("pr", "Puerto Rico"),
    ("ps", "Palestine, State of"),
    ("pt", "Portugal"),
    ("py", "Paraguay"),
    ("re", "Reunion"),
    ("ro", "Romania"),
    ("rs", "Serbia"),
    ("ru", "Russian Federation"),
    ("rw", "Rwanda"),
    ("sa", "Saudi Arabia"),
    ("sc", "Seychelles"),
    ("sd", "Sudan"),
    ("se", "Sweden"),
    ("sg", "Singapore"),
    ("sh", "Saint Helena, Ascension and Tristan da Cunha"),
    ("si", "Slovenia"),
    ("sk", "Slovakia"),
    ("sl", "Sierra Leone"),
    ("sm", "San Marino"),
    ("sn", "Senegal"),
    ("so", "Somalia"),
    ("sr", "Suriname"),
    ("st", "Sao Tome and Principe"),
    ("sv", "El Salvador"),
    ("sy", "Syrian Arab Republic"),
    ("sz", "Swaziland"),
    ("td", "Chad"),
    ("tg", "Togo"),
    ("th", "Thailand"),
    ("tj", "Tajikistan"),
    ("tl", "Timor-Leste"),
    ("tm", "Turkmenistan"),
    ("tn", "Tunisia"),
    ("tr", "Turkey"),
    ("tw", "Taiwan (Republic of China)"),
    ("tz", "Tanzania, United Republic of"),
    ("ua", "Ukraine"),
    ("ug", "Uganda"),
    ("us", "United States"),
    ("uy", "Uruguay"),
    ("uz", "Uzbekistan"),
    ("va", "Holy See (Vatican City State)"),
    ("ve", "Venezuela, Bolivarian Republic of"),
    ("vn", "Viet Nam"),
    ("ye", "Yemen"),
    ("yt", "Mayotte"),
    ("za", "South Africa"),
    ("zm", "Zambia"),
    ("zw", "Zimbabwe"),
];

#[cfg(test)]
mod test_country_codes {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn table_has_common_countries() {
        let countries = world_countries();
        assert_eq!(countries.len(), COUNTRY_NAMES.len());
        assert_eq!(countries["cn"], "China");
        assert_eq!(countries["gb"], "United Kingdom");
        assert_eq!(countries["us"], "United States");
    }

    #[test]
    fn codes_are_unique_and_lowercase() {
        let countries = world_countries();
        assert_eq!(countries.len(), COUNTRY_NAMES.len());
        assert!(countries.keys().all(|c| c.len() == 2 && c.chars().all(|ch| ch.is_ascii_lowercase())));
    }

    #[test]
    fn loads_codes_from_csv() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("codes.csv");
        fs::write(&path, "code,name\nUS,United States\nxk,Kosovo\n,Nowhere\n").unwrap();

        let codes = load_country_codes(&path, b',', b'"').unwrap();
        assert_eq!(codes.len(), 2);
        assert_eq!(codes["us"], "United States");
        assert_eq!(codes["xk"], "Kosovo");
    }

    #[test]
    fn rejects_single_column_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("codes.csv");
        fs::write(&path, "code\nus\n").unwrap();

        assert!(load_country_codes(&path, b',', b'"').is_err());
    }
}
