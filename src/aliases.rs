//! Este modulo define aliases a los distintos tipos de datos
//! para hacer sencillo el pase de uno al otro y dar mayor
//! claridad al codigo

use std::collections::BTreeMap;

pub type NumeroOrden = u64;
pub type IdRecurso = u32;
pub type CantidadRecurso = u32;
pub type Profundidad = u8;
/// Cantidad de apariciones de cada numero de orden de dependencia
pub type TablaOcurrencias = BTreeMap<NumeroOrden, usize>;
