//! Este modulo permite generar arboles de ordenes aleatorios, donde
//! una gran parte de las cosas son parametrizables. Cada orden principal
//! tiene dependencias que se crean nuevas o se copian del pozo de
//! dependencias reutilizables, hasta la profundidad maxima configurada.

use std::ops::Range;

use colored::Colorize;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::fechas::{self, VENTANA_DEPENDENCIA, VENTANA_PRINCIPAL};
use super::pozo::Pozo;
use crate::aliases::{NumeroOrden, Profundidad};
use crate::config::Config;
use crate::errores::ErrorConfiguracion;
use crate::orden::{descripcion_de_nivel, Estado, Orden, Recurso};
use crate::{INTERVALO_PROGRESO, RANGO_ID_RECURSO};

/// Entrega numeros de orden de dependencia consecutivos, salteando el rango
/// reservado para las ordenes principales
#[derive(Debug, Clone)]
pub struct Numerador {
    siguiente: NumeroOrden,
    reservado: Range<NumeroOrden>,
}

impl Numerador {
    pub fn new(inicio: NumeroOrden, reservado: Range<NumeroOrden>) -> Self {
        Self {
            siguiente: inicio,
            reservado,
        }
    }

    /// Devuelve un numero nunca antes entregado y fuera del rango reservado
    pub fn siguiente(&mut self) -> NumeroOrden {
        if self.reservado.contains(&self.siguiente) {
            self.siguiente = self.reservado.end;
        }
        let numero = self.siguiente;
        self.siguiente += 1;
        numero
    }
}

/// Generador de ordenes. Toda la aleatoriedad sale de `rng`, por lo que con
/// una fuente sembrada la generacion es reproducible
pub struct Generador<'a, R: Rng> {
    config: &'a Config,
    rng: R,
    numerador: Numerador,
}

impl<'a> Generador<'a, StdRng> {
    /// Crea un generador con la semilla de la configuracion, o una de entropia si no tiene
    pub fn desde_config(config: &'a Config) -> Result<Self, ErrorConfiguracion> {
        let rng = match config.semilla {
            Some(semilla) => StdRng::seed_from_u64(semilla),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<'a, R: Rng> Generador<'a, R> {
    /// Crea un generador validando antes la configuracion
    /// # Errors
    /// * el primer `ErrorConfiguracion` que encuentre la validacion
    pub fn new(config: &'a Config, rng: R) -> Result<Self, ErrorConfiguracion> {
        config.validar()?;
        let reservado = config.inicio_principales..config.fin_principales();
        Ok(Self {
            config,
            rng,
            numerador: Numerador::new(config.inicio_dependencias, reservado),
        })
    }

    /// Genera el pozo y todas las ordenes principales. El pozo se descarta al terminar
    pub fn generar(&mut self) -> Vec<Orden> {
        println!("Generando el pozo de dependencias...");
        let tam_pozo = self.config.tam_pozo;
        let pozo = Pozo::construir(self, tam_pozo);
        debug!(tam = pozo.len(), "pozo de dependencias construido");

        println!(
            "Generando {} ordenes principales...",
            self.config.cantidad.to_string().blue()
        );
        self.generar_principales(&pozo)
    }

    /// Genera las ordenes principales, numeradas de forma consecutiva desde el
    /// inicio configurado
    pub fn generar_principales(&mut self, pozo: &Pozo) -> Vec<Orden> {
        let mut ordenes = Vec::with_capacity(self.config.cantidad);
        let mut camino = Vec::with_capacity(usize::from(self.config.profundidad_maxima) + 1);

        let numeros = self.config.inicio_principales..self.config.fin_principales();
        for (i, numero) in numeros.enumerate() {
            ordenes.push(self.generar_orden(numero, 0, pozo, &mut camino));

            if (i + 1) % INTERVALO_PROGRESO == 0 {
                println!("Generadas {} ordenes...", (i + 1).to_string().blue());
            }
        }
        ordenes
    }

    /// Genera una orden completa a la profundidad dada, con su arbol de
    /// dependencias. `camino` tiene los numeros de los ancestros de la orden
    pub fn generar_orden(
        &mut self,
        numero: NumeroOrden,
        profundidad: Profundidad,
        pozo: &Pozo,
        camino: &mut Vec<NumeroOrden>,
    ) -> Orden {
        let mut orden = self.orden_base(numero, profundidad);
        camino.push(numero);
        orden.dependencias = self.generar_dependencias(profundidad, pozo, camino);
        camino.pop();
        orden
    }

    /// Genera las dependencias directas de una orden a la profundidad dada. Las
    /// principales tienen al menos una; las del ultimo nivel, ninguna
    fn generar_dependencias(
        &mut self,
        profundidad: Profundidad,
        pozo: &Pozo,
        camino: &mut Vec<NumeroOrden>,
    ) -> Vec<Orden> {
        if profundidad >= self.config.profundidad_maxima {
            return Vec::new();
        }
        let maximo = self.config.max_dependencias;
        let minimo = if profundidad == 0 { maximo.min(1) } else { 0 };
        let cantidad = self.rng.gen_range(minimo..=maximo);

        let mut dependencias = Vec::new();
        for _ in 0..cantidad {
            dependencias.push(self.generar_dependencia(profundidad + 1, pozo, camino));
        }
        dependencias
    }

    /// Genera una dependencia: con la probabilidad de reuso copia una entrada del
    /// pozo que no este en el camino, y si no crea una orden nueva
    fn generar_dependencia(
        &mut self,
        profundidad: Profundidad,
        pozo: &Pozo,
        camino: &mut Vec<NumeroOrden>,
    ) -> Orden {
        if self.rng.gen_bool(self.config.probabilidad_reuso) {
            if let Some(entrada) = pozo.elegir(&mut self.rng, &camino[..]) {
                let mut copia = entrada.clone();
                copia.descripcion = descripcion_de_nivel(profundidad);
                camino.push(copia.numero);
                copia.dependencias = self.generar_dependencias(profundidad, pozo, camino);
                camino.pop();
                return copia;
            }
        }
        let numero = self.numerador.siguiente();
        self.generar_orden(numero, profundidad, pozo, camino)
    }

    pub(crate) fn siguiente_numero_dependencia(&mut self) -> NumeroOrden {
        self.numerador.siguiente()
    }

    /// Orden sin dependencias, con estado, fechas y recursos sorteados
    pub(crate) fn orden_base(&mut self, numero: NumeroOrden, profundidad: Profundidad) -> Orden {
        let ventana = if profundidad == 0 {
            VENTANA_PRINCIPAL
        } else {
            VENTANA_DEPENDENCIA
        };
        let horizonte = self.config.horizonte;
        let plan = fechas::sortear_plan(&mut self.rng, horizonte, ventana);
        let estado = self.sortear_estado();
        let (inicio_real, fin_real) =
            fechas::sortear_reales(&mut self.rng, estado, plan, horizonte.1);

        let cantidad_recursos = self.rng.gen_range(1..=self.config.max_recursos);
        let recursos = (0..cantidad_recursos)
            .filter_map(|_| self.generar_recurso())
            .collect();

        Orden {
            numero,
            inicio_planificado: plan.0,
            fin_planificado: plan.1,
            inicio_real,
            descripcion: descripcion_de_nivel(profundidad),
            estado,
            fin_real,
            dependencias: Vec::new(),
            recursos,
        }
    }

    /// `validar` rechaza un conjunto de estados vacio, por lo que el
    /// `unwrap_or` nunca se usa
    fn sortear_estado(&mut self) -> Estado {
        self.config
            .estados
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Estado::Empty)
    }

    /// Sortea un recurso del catalogo. Solo devuelve `None` con un catalogo
    /// vacio o con una entrada sin nombres o unidades, y `validar` rechaza
    /// ambos casos antes de crear el generador
    fn generar_recurso(&mut self) -> Option<Recurso> {
        let entrada = self.config.catalogo.entradas().choose(&mut self.rng)?;
        Some(Recurso {
            id: self.rng.gen_range(RANGO_ID_RECURSO),
            nombre: entrada.nombres.choose(&mut self.rng)?.clone(),
            tipo: entrada.tipo.clone(),
            cantidad: self
                .rng
                .gen_range(entrada.cantidad_minima..=entrada.cantidad_maxima),
            unidad: entrada.unidades.choose(&mut self.rng)?.clone(),
        })
    }
}
