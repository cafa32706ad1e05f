use anyhow::{Context as _, Result, bail};
use aurakit::Backend;

use crate::Context;
use crate::report::Output;

pub fn run(ctx: &Context, name: &str, remote: bool, out: &mut dyn Output) -> Result<()> {
    let backend = ctx.backend()?;
    show(&backend, name, remote, out)
}

fn show<B: Backend + ?Sized>(
    backend: &B,
    name: &str,
    remote: bool,
    out: &mut dyn Output,
) -> Result<()> {
    let meta = if remote {
        backend.query_remote(name)
    } else {
        backend.query_local(name)
    }
    .with_context(|| format!("Could not query '{name}'"))?;

    if meta.is_empty() {
        if remote {
            bail!("No package '{name}' found on AUR.");
        }
        bail!("Package '{name}' is not installed.");
    }

    out.metadata(&meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::RecordingOutput;
    use aurakit::MockBackend;

    #[test]
    fn test_local_and_remote() {
        let backend = MockBackend::new();
        backend.add_local("foo", "1").add_remote("foo", "2");

        let mut out = RecordingOutput::default();
        show(&backend, "foo", false, &mut out).unwrap();
        show(&backend, "foo", true, &mut out).unwrap();

        let versions: Vec<_> = out.metadata.iter().map(|m| m.version()).collect();
        assert_eq!(versions, vec![Some("1"), Some("2")]);
    }

    #[test]
    fn test_missing_package() {
        let backend = MockBackend::new();
        let mut out = RecordingOutput::default();

        let err = show(&backend, "foo", true, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "No package 'foo' found on AUR.");

        let err = show(&backend, "foo", false, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Package 'foo' is not installed.");
        assert!(out.metadata.is_empty());
    }
}
