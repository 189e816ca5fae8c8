/// Profile picture exactly as the user picked it. Decoding happens later, at the
/// upload stage, so an empty or corrupt payload is still a valid request.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileImage(Vec<u8>);

impl ProfileImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ProfileImage {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for ProfileImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProfileImage({} bytes)", self.0.len())
    }
}
