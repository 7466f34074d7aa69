//! Embeds the git commit into dev builds as `VERGEN_GIT_SHA`.
//!
//! `--features release` builds skip it so `kubecolor --kubecolor-version`
//! prints the bare package version.

fn main() {
    #[cfg(not(feature = "release"))]
    emit_git_sha();
}

#[cfg(not(feature = "release"))]
fn emit_git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    // Source tarballs have no .git; lib.rs treats "unknown" as absent.
    if let Err(err) = emitted {
        println!("cargo:warning=git sha unavailable: {}", err);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
