//! Núcleo de cálculo do sistema
//!
//! Funções puras sobre dados já carregados: codec monetário, classificação
//! financeira, total de OS e fechamentos. Nada aqui faz I/O.

pub mod financeiro;
pub mod moeda;
pub mod relatorio;
