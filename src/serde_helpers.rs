pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn is_true(b: &bool) -> bool {
    *b
}

pub(crate) fn is_identity(affine: &kurbo::Affine) -> bool {
    *affine == kurbo::Affine::IDENTITY
}
