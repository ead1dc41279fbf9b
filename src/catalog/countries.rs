//! Built-in country catalog: ISO codes, Hungarian names, continent groups.

use super::entry::CatalogEntry;
use super::registry::Catalog;

/// `(code, name, group)` rows.
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("HU", "Magyarország", "europe"),
    ("US", "Amerikai Egyesült Államok", "americas"),
    ("GB", "Nagy-Britannia", "europe"),
    ("FR", "Franciaország", "europe"),
    ("DE", "Németország", "europe"),
    ("IT", "Olaszország", "europe"),
    ("ES", "Spanyolország", "europe"),
    ("PL", "Lengyelország", "europe"),
    ("RO", "Románia", "europe"),
    ("NL", "Hollandia", "europe"),
    ("GR", "Görögország", "europe"),
    ("PT", "Portugália", "europe"),
    ("AT", "Ausztria", "europe"),
    ("JP", "Japán", "asia"),
    ("CN", "Kína", "asia"),
    ("IN", "India", "asia"),
    ("KR", "Dél-Korea", "asia"),
    ("TH", "Thaiföld", "asia"),
    ("VN", "Vietnám", "asia"),
    ("ID", "Indonézia", "asia"),
    ("TR", "Törökország", "asia"),
    ("CA", "Kanada", "americas"),
    ("MX", "Mexikó", "americas"),
    ("BR", "Brazília", "americas"),
    ("AR", "Argentína", "americas"),
    ("CL", "Chile", "americas"),
    ("CO", "Kolumbia", "americas"),
    ("PE", "Peru", "americas"),
    ("CU", "Kuba", "americas"),
    ("EG", "Egyiptom", "africa"),
    ("ZA", "Dél-afrikai Köztársaság", "africa"),
    ("NG", "Nigéria", "africa"),
    ("KE", "Kenya", "africa"),
    ("MA", "Marokkó", "africa"),
    ("GH", "Ghána", "africa"),
    ("ET", "Etiópia", "africa"),
    ("SN", "Szenegál", "africa"),
    ("AU", "Ausztrália", "oceania"),
    ("NZ", "Új-Zéland", "oceania"),
    ("FJ", "Fidzsi-szigetek", "oceania"),
    ("PG", "Pápua Új-Guinea", "oceania"),
];

impl Catalog {
    /// The built-in country catalog.
    #[must_use]
    pub fn countries() -> Self {
        let mut catalog = Catalog::new();
        for &(code, name, group) in COUNTRIES {
            // codes are unique; checked by test below
            let _ = catalog.register(CatalogEntry::new(code, name, group));
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::GroupFilter;

    #[test]
    fn test_codes_unique() {
        let entries = COUNTRIES
            .iter()
            .map(|&(code, name, group)| CatalogEntry::new(code, name, group));
        assert!(Catalog::from_entries(entries).is_ok());
        assert_eq!(Catalog::countries().len(), COUNTRIES.len());
    }

    #[test]
    fn test_codes_are_alpha2() {
        for entry in Catalog::countries().iter() {
            let code = entry.id.as_str();
            assert_eq!(code.len(), 2, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_uppercase()), "{code}");
        }
    }

    #[test]
    fn test_europe_has_twelve() {
        let catalog = Catalog::countries();
        let europe = GroupFilter::group("europe");
        assert_eq!(catalog.in_group(&europe).count(), 12);
        assert_eq!(
            catalog.groups(),
            vec!["europe", "americas", "asia", "africa", "oceania"]
        );
    }
}
