//! Este modulo define el pozo de ordenes de dependencia reutilizables. Las
//! entradas se crean una sola vez por corrida y no se modifican: quien las
//! reutiliza se lleva una copia.

use rand::seq::IteratorRandom;
use rand::Rng;

use super::ordenes_gen::Generador;
use crate::aliases::NumeroOrden;
use crate::orden::Orden;

/// Pozo de ordenes de dependencia. Las entradas no tienen dependencias propias,
/// estas se generan al momento de adjuntarlas bajo otra orden
#[derive(Debug, Default)]
pub struct Pozo {
    entradas: Vec<Orden>,
}

impl Pozo {
    /// Construye un pozo de `tam` ordenes completas, con numeros de dependencia unicos
    pub fn construir<R: Rng>(generador: &mut Generador<'_, R>, tam: usize) -> Self {
        let entradas = (0..tam)
            .map(|_| {
                let numero = generador.siguiente_numero_dependencia();
                generador.orden_base(numero, 1)
            })
            .collect();
        Self { entradas }
    }

    pub fn entradas(&self) -> &[Orden] {
        &self.entradas
    }

    pub fn len(&self) -> usize {
        self.entradas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entradas.is_empty()
    }

    /// Elige al azar una entrada cuyo numero no este entre los excluidos.
    /// Devuelve `None` si no queda ninguna elegible
    pub fn elegir<R: Rng>(&self, rng: &mut R, excluidos: &[NumeroOrden]) -> Option<&Orden> {
        self.entradas
            .iter()
            .filter(|entrada| !excluidos.contains(&entrada.numero))
            .choose(rng)
    }
}
