//! Instance construction errors.

use super::VertexId;

/// Which side of an instance a vertex set plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexRole {
    /// Demand points.
    User,
    /// Candidate sites.
    Facility,
}

impl std::fmt::Display for VertexRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VertexRole::User => write!(f, "user"),
            VertexRole::Facility => write!(f, "facility"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyVertexSetError {
    role: VertexRole,
}

impl EmptyVertexSetError {
    pub fn new(role: VertexRole) -> Self {
        Self { role }
    }

    pub fn role(&self) -> VertexRole {
        self.role
    }
}

impl std::fmt::Display for EmptyVertexSetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The {} set is empty", self.role)
    }
}

impl std::error::Error for EmptyVertexSetError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateIdError {
    role: VertexRole,
    id: VertexId,
}

impl DuplicateIdError {
    pub fn new(role: VertexRole, id: VertexId) -> Self {
        Self { role, id }
    }

    pub fn role(&self) -> VertexRole {
        self.role
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}

impl std::fmt::Display for DuplicateIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The {} ID {} appears more than once", self.role, self.id)
    }
}

impl std::error::Error for DuplicateIdError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionMismatchError {
    expected: usize,
    actual: usize,
}

impl DimensionMismatchError {
    pub fn new(expected: usize, actual: usize) -> Self {
        Self { expected, actual }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for DimensionMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Distance table has {} entries, expected {}",
            self.actual, self.expected
        )
    }
}

impl std::error::Error for DimensionMismatchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    EmptyVertexSet(EmptyVertexSetError),
    DuplicateId(DuplicateIdError),
    DimensionMismatch(DimensionMismatchError),
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::EmptyVertexSet(err) => write!(f, "{}", err),
            InstanceError::DuplicateId(err) => write!(f, "{}", err),
            InstanceError::DimensionMismatch(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for InstanceError {}

impl From<EmptyVertexSetError> for InstanceError {
    fn from(err: EmptyVertexSetError) -> Self {
        InstanceError::EmptyVertexSet(err)
    }
}

impl From<DuplicateIdError> for InstanceError {
    fn from(err: DuplicateIdError) -> Self {
        InstanceError::DuplicateId(err)
    }
}

impl From<DimensionMismatchError> for InstanceError {
    fn from(err: DimensionMismatchError) -> Self {
        InstanceError::DimensionMismatch(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFacilityError {
    id: VertexId,
}

impl UnknownFacilityError {
    pub fn new(id: VertexId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}

impl std::fmt::Display for UnknownFacilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Facility with ID {} is not part of the instance", self.id)
    }
}

impl std::error::Error for UnknownFacilityError {}
