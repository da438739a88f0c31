//! Inicializacion del registro de diagnostico. La salida para el usuario va por
//! consola; esto solo agrega los eventos de `tracing`, filtrados con `RUST_LOG`
//! (por defecto `warn`) y escritos por stderr.

use tracing_subscriber::EnvFilter;

pub fn inicializar() {
    let filtro = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // si ya habia un subscriber instalado se conserva ese
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_writer(std::io::stderr)
        .try_init();
}
