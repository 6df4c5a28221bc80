use std::fmt;

/// Why a point correspondence cannot define a projective transform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Degeneracy {
    /// Three of the source points lie on one line (duplicates included).
    CollinearSource,
    /// Three of the destination points lie on one line (duplicates included).
    CollinearDestination,
    /// The 8×8 coefficient system has no unique solution.
    SingularSystem,
    /// The solved 3×3 matrix is not invertible.
    SingularMatrix,
    /// An input coordinate or solved coefficient is NaN or infinite.
    NonFinite,
}

impl Degeneracy {
    fn describe(self) -> &'static str {
        match self {
            Degeneracy::CollinearSource => "three source points are collinear",
            Degeneracy::CollinearDestination => "three destination points are collinear",
            Degeneracy::SingularSystem => "linear system is singular",
            Degeneracy::SingularMatrix => "solved matrix is singular",
            Degeneracy::NonFinite => "non-finite coordinate",
        }
    }
}

/// Error raised while deriving a homography.
#[derive(Debug, Clone, PartialEq)]
pub enum HomographyError {
    DegenerateCorrespondence(Degeneracy),
}

impl HomographyError {
    /// The underlying degeneracy.
    pub fn degeneracy(&self) -> Degeneracy {
        match self {
            HomographyError::DegenerateCorrespondence(d) => *d,
        }
    }
}

impl fmt::Display for HomographyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomographyError::DegenerateCorrespondence(d) => {
                write!(f, "degenerate correspondence: {}", d.describe())
            }
        }
    }
}

impl std::error::Error for HomographyError {}
