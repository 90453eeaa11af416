use std::{
    collections::BTreeSet,
    fs,
    path::PathBuf,
};
use viewinject_core::{
    host::{Filer, FilerError},
    java,
    prelude::TypeElement,
};

///
/// FsFiler
///
/// Writes generated sources under an output root using the usual
/// package-directory layout. A name may only be created once per filer.
///

#[derive(Debug)]
pub struct FsFiler {
    root: PathBuf,
    created: BTreeSet<String>,
    written: Vec<PathBuf>,
}

impl FsFiler {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            created: BTreeSet::new(),
            written: Vec::new(),
        }
    }

    /// `root/com/example/Foo$$ViewInjector.java` for
    /// `com.example.Foo$$ViewInjector`.
    #[must_use]
    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        let mut path = self.root.clone();
        let (package, class) = qualified_name
            .rsplit_once('.')
            .unwrap_or(("", qualified_name));

        for segment in package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{class}.java"));

        path
    }

    /// Files written so far, in write order.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Filer for FsFiler {
    fn create_source_file(
        &mut self,
        qualified_name: &str,
        origin: &TypeElement,
        contents: &str,
    ) -> Result<(), FilerError> {
        java::validate_qualified_name(qualified_name).map_err(|reason| {
            FilerError::InvalidName {
                name: qualified_name.to_string(),
                reason,
            }
        })?;

        if self.created.contains(qualified_name) {
            return Err(FilerError::AlreadyExists(qualified_name.to_string()));
        }

        let path = self.path_for(qualified_name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| FilerError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, contents).map_err(|source| FilerError::Io {
            path: path.clone(),
            source,
        })?;

        tracing::info!(
            file = %path.display(),
            origin = origin.qualified_name(),
            "wrote injector"
        );

        self.created.insert(qualified_name.to_string());
        self.written.push(path);

        Ok(())
    }
}
