use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A single `CENTRE)OBJECT` record: `object` orbits `centre`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orbit {
    pub centre: String,
    pub object: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected CENTRE)OBJECT, found {record:?}")]
pub struct MalformedOrbit {
    pub record: String,
}

impl FromStr for Orbit {
    type Err = MalformedOrbit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let record = s.trim();
        let malformed = || MalformedOrbit {
            record: record.to_string(),
        };

        let (centre, object): (&str, &str) = record
            .split(')')
            .collect_tuple()
            .ok_or_else(malformed)?;
        if centre.is_empty() || object.is_empty() {
            return Err(malformed());
        }

        Ok(Orbit {
            centre: centre.to_string(),
            object: object.to_string(),
        })
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}){}", self.centre, self.object)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_orbit() {
        let orbit: Orbit = "COM)B".parse().unwrap();
        assert_eq!(orbit.centre, "COM");
        assert_eq!(orbit.object, "B");
        assert_eq!(orbit.to_string(), "COM)B");
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let orbit: Orbit = "  K)YOU \r".parse().unwrap();
        assert_eq!(
            orbit,
            Orbit {
                centre: "K".to_string(),
                object: "YOU".to_string()
            }
        );
    }

    #[rstest]
    #[case("COM")]
    #[case("A)B)C")]
    #[case(")B")]
    #[case("A)")]
    #[case(")")]
    fn malformed_orbit(#[case] record: &str) {
        let error = record.parse::<Orbit>().unwrap_err();
        assert_eq!(error.record, record);
    }
}
