//! Sorteo de las fechas planificadas y reales de una orden, siempre dentro
//! del horizonte configurado.

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::orden::Estado;

/// Probabilidad de que una orden completada tenga fecha de finalizacion real
const PROB_FIN_COMPLETADA: f64 = 0.9;
/// Probabilidad de que una orden sin trabajo en curso tenga fecha de inicio real
const PROB_INICIO_SIN_AVANCE: f64 = 0.3;

/// Ventana en dias, relativa al inicio del horizonte, de donde se sortean
/// las fechas planificadas
#[derive(Debug, Clone, Copy)]
pub struct VentanaPlan {
    /// Ultimo dia posible para el inicio planificado
    pub max_inicio: u64,
    /// Primer dia posible para el fin planificado
    pub min_fin: u64,
}

/// Las ordenes principales arrancan en el primer trimestre y terminan en el ultimo tramo del año
pub const VENTANA_PRINCIPAL: VentanaPlan = VentanaPlan {
    max_inicio: 90,
    min_fin: 213,
};

pub const VENTANA_DEPENDENCIA: VentanaPlan = VentanaPlan {
    max_inicio: 152,
    min_fin: 152,
};

/// Devuelve una fecha uniforme entre `desde` y `hasta`, ambos inclusive. Si el
/// rango esta invertido devuelve `desde`
pub fn fecha_entre<R: Rng>(rng: &mut R, desde: NaiveDate, hasta: NaiveDate) -> NaiveDate {
    let dias = (hasta - desde).num_days();
    if dias <= 0 {
        return desde;
    }
    let sorteo = rng.gen_range(0..=dias) as u64;
    desde.checked_add_days(Days::new(sorteo)).unwrap_or(hasta)
}

/// Fecha a `dias` del inicio del horizonte, sin pasarse de su fin
fn desplazar(horizonte: (NaiveDate, NaiveDate), dias: u64) -> NaiveDate {
    horizonte
        .0
        .checked_add_days(Days::new(dias))
        .map_or(horizonte.1, |fecha| fecha.min(horizonte.1))
}

/// Sortea inicio y fin planificados dentro de la ventana. El fin nunca es
/// anterior al inicio
pub fn sortear_plan<R: Rng>(
    rng: &mut R,
    horizonte: (NaiveDate, NaiveDate),
    ventana: VentanaPlan,
) -> (NaiveDate, NaiveDate) {
    let inicio = fecha_entre(rng, horizonte.0, desplazar(horizonte, ventana.max_inicio));
    let min_fin = desplazar(horizonte, ventana.min_fin).max(inicio);
    let fin = fecha_entre(rng, min_fin, horizonte.1);
    (inicio, fin)
}

/// Sortea las fechas reales segun el estado de la orden:
/// * `pending` no tiene ninguna
/// * `started` e `in_progress` tienen solo inicio
/// * `completed` tiene inicio y casi siempre fin
/// * `unexecutable` y el estado vacio a veces tienen inicio, nunca fin
pub fn sortear_reales<R: Rng>(
    rng: &mut R,
    estado: Estado,
    plan: (NaiveDate, NaiveDate),
    fin_horizonte: NaiveDate,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let tiene_inicio = match estado {
        Estado::Pending => false,
        Estado::Started | Estado::InProgress | Estado::Completed => true,
        Estado::Unexecutable | Estado::Empty => rng.gen_bool(PROB_INICIO_SIN_AVANCE),
    };
    if !tiene_inicio {
        return (None, None);
    }

    let inicio = fecha_entre(rng, plan.0, plan.1);
    let fin = (estado.indica_finalizacion() && rng.gen_bool(PROB_FIN_COMPLETADA))
        .then(|| fecha_entre(rng, inicio, fin_horizonte.max(inicio)));
    (Some(inicio), fin)
}
