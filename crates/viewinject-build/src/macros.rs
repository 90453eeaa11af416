/// Build-script helper: generates injectors for a manifest into
/// `OUT_DIR/viewinject`.
///
/// ```ignore
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     viewinject::build!("viewinject.toml");
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! build {
    ($manifest:expr) => {
        $crate::build!($manifest, config = None::<&str>)
    };
    ($manifest:expr, config = $config:expr) => {
        use std::path::Path;

        //
        // CARGO
        //

        let manifest = Path::new($manifest);
        println!("cargo:rerun-if-changed=build.rs");
        println!("cargo:rerun-if-changed={}", manifest.display());

        let config = match $config {
            Some(path) => {
                let path = Path::new(path);
                println!("cargo:rerun-if-changed={}", path.display());
                $crate::load_config(path)?
            }
            None => $crate::GeneratorConfig::default(),
        };

        //
        // GENERATE
        //

        let out_dir = $crate::build_script_out_dir()?;
        $crate::generate(manifest, &out_dir, config)?.into_result()?;
    };
}
