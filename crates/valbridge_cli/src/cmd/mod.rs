/// Item path selection command.
pub mod get;
/// Value summary command.
pub mod info;
/// Value tree rendering shared by commands.
pub mod print;
/// Literal file print command.
pub mod show;

pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;
