//! Handlers de ordens de serviço
//!
//! Caminho único de gravação: criação e edição recebem a OS completa
//! (itens inclusos), o total é recalculado no servidor e tudo é persistido
//! em uma única transação. Pagamentos ficam em rotas aninhadas e o livro
//! é só-acréscimo.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::financeiro::{classificar, saldo, total_ordem},
    domain::moeda::parse_valor,
    models::ordem_servico::{
        ItemOrdem, OrdemComAgregados, OrdemDetalheResponse, OrdemResumoResponse, OrdemServico,
        SalvarOrdemRequest,
    },
    models::pagamento::{CreatePagamentoRequest, Pagamento},
    state::AppState,
    utils::errors::{nao_encontrado, AppResult},
};

pub fn criar_router() -> Router<AppState> {
    Router::new()
        .route("/", get(listar).post(criar))
        .route("/:id", get(buscar).put(atualizar))
        .route("/:id/pagamentos", get(listar_pagamentos).post(registrar_pagamento))
}

const SQL_LISTAGEM: &str = r#"
    SELECT o.id, o.cliente_id, c.nome AS cliente_nome,
           o.veiculo_id, v.placa AS veiculo_placa,
           v.marca AS veiculo_marca, v.modelo AS veiculo_modelo,
           o.data_entrada, o.data_saida, o.status, o.desconto,
           o.vencimento, o.total,
           COALESCE((SELECT SUM(p.valor) FROM pagamentos p
                     WHERE p.ordem_servico_id = o.id), 0) AS total_pago,
           o.created_at
    FROM ordens_servico o
    JOIN clientes c ON c.id = o.cliente_id
    LEFT JOIN veiculos v ON v.id = o.veiculo_id
    ORDER BY o.data_entrada DESC
"#;

/// Lista todas as OS com agregados de cobrança e situação derivada
pub async fn listar(State(state): State<AppState>) -> AppResult<Json<Vec<OrdemResumoResponse>>> {
    let linhas = sqlx::query_as::<_, OrdemComAgregados>(SQL_LISTAGEM)
        .fetch_all(&state.pool)
        .await?;

    let hoje = Utc::now().date_naive();
    let ordens = linhas
        .into_iter()
        .map(|linha| OrdemResumoResponse::montar(linha, hoje))
        .collect();

    Ok(Json(ordens))
}

/// Busca uma OS com itens, pagamentos e situação financeira
pub async fn buscar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<OrdemDetalheResponse>> {
    let ordem = sqlx::query_as::<_, OrdemServico>("SELECT * FROM ordens_servico WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| nao_encontrado("Ordem de serviço", id))?;

    let servicos = sqlx::query_as::<_, ItemOrdem>(
        "SELECT * FROM servicos_os WHERE ordem_servico_id = $1 ORDER BY created_at",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    let pecas = sqlx::query_as::<_, ItemOrdem>(
        "SELECT * FROM pecas_os WHERE ordem_servico_id = $1 ORDER BY created_at",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    let pagamentos = sqlx::query_as::<_, Pagamento>(
        "SELECT * FROM pagamentos WHERE ordem_servico_id = $1 ORDER BY data_pagamento",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    let total_pago: Decimal = pagamentos.iter().map(|p| p.valor).sum();
    let hoje = Utc::now().date_naive();

    Ok(Json(OrdemDetalheResponse {
        saldo: saldo(ordem.total, total_pago),
        status_financeiro: classificar(ordem.total, total_pago, ordem.vencimento, hoje),
        ordem,
        servicos,
        pecas,
        pagamentos,
        total_pago,
    }))
}

/// Cria uma OS completa em uma transação: ordem, itens e, se informado,
/// o pagamento inicial
pub async fn criar(
    State(state): State<AppState>,
    Json(dados): Json<SalvarOrdemRequest>,
) -> AppResult<Json<OrdemServico>> {
    dados.validate()?;

    let desconto = dados.desconto.as_deref().map(parse_valor).unwrap_or(Decimal::ZERO);
    let valores_servicos: Vec<Decimal> =
        dados.servicos.iter().map(|item| parse_valor(&item.valor)).collect();
    let valores_pecas: Vec<Decimal> =
        dados.pecas.iter().map(|item| parse_valor(&item.valor)).collect();
    let total = total_ordem(&valores_servicos, &valores_pecas, desconto);

    let mut tx = state.pool.begin().await?;

    let ordem = sqlx::query_as::<_, OrdemServico>(
        r#"
        INSERT INTO ordens_servico
            (cliente_id, veiculo_id, data_entrada, data_saida, km_entrada, como_chegou,
             reclamacao_cliente, diagnostico, o_que_foi_feito, observacoes, status,
             desconto, vencimento, total)
        VALUES ($1, $2, COALESCE($3, now()), $4, $5, $6, $7, $8, $9, $10,
                COALESCE($11, 'em andamento'), $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(dados.cliente_id)
    .bind(dados.veiculo_id)
    .bind(inicio_do_dia(dados.data_entrada))
    .bind(inicio_do_dia(dados.data_saida))
    .bind(dados.km_entrada)
    .bind(&dados.como_chegou)
    .bind(&dados.reclamacao_cliente)
    .bind(&dados.diagnostico)
    .bind(&dados.o_que_foi_feito)
    .bind(&dados.observacoes)
    .bind(&dados.status)
    .bind(desconto)
    .bind(dados.vencimento)
    .bind(total)
    .fetch_one(&mut *tx)
    .await?;

    inserir_itens(&mut tx, "servicos_os", ordem.id, &dados.servicos, &valores_servicos).await?;
    inserir_itens(&mut tx, "pecas_os", ordem.id, &dados.pecas, &valores_pecas).await?;

    if let Some(texto) = dados.valor_pago.as_deref() {
        let valor = parse_valor(texto);
        if valor > Decimal::ZERO {
            sqlx::query(
                r#"
                INSERT INTO pagamentos (ordem_servico_id, valor, forma_pagamento, observacoes)
                VALUES ($1, $2, COALESCE($3, 'PIX'), $4)
                "#,
            )
            .bind(ordem.id)
            .bind(valor)
            .bind(&dados.forma_pagamento)
            .bind(Option::<String>::None)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    tracing::info!("✅ OS criada: {} (total {})", ordem.id, ordem.total);
    Ok(Json(ordem))
}

/// Edita uma OS completa em uma transação: regrava os campos, recalcula o
/// total e substitui os itens. Pagamentos não são tocados aqui.
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<SalvarOrdemRequest>,
) -> AppResult<Json<OrdemServico>> {
    dados.validate()?;

    let desconto = dados.desconto.as_deref().map(parse_valor).unwrap_or(Decimal::ZERO);
    let valores_servicos: Vec<Decimal> =
        dados.servicos.iter().map(|item| parse_valor(&item.valor)).collect();
    let valores_pecas: Vec<Decimal> =
        dados.pecas.iter().map(|item| parse_valor(&item.valor)).collect();
    let total = total_ordem(&valores_servicos, &valores_pecas, desconto);

    let mut tx = state.pool.begin().await?;

    let ordem = sqlx::query_as::<_, OrdemServico>(
        r#"
        UPDATE ordens_servico SET
            cliente_id = $2,
            veiculo_id = $3,
            data_entrada = COALESCE($4, data_entrada),
            data_saida = $5,
            km_entrada = $6,
            como_chegou = $7,
            reclamacao_cliente = $8,
            diagnostico = $9,
            o_que_foi_feito = $10,
            observacoes = $11,
            status = COALESCE($12, status),
            desconto = $13,
            vencimento = $14,
            total = $15
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(dados.cliente_id)
    .bind(dados.veiculo_id)
    .bind(inicio_do_dia(dados.data_entrada))
    .bind(inicio_do_dia(dados.data_saida))
    .bind(dados.km_entrada)
    .bind(&dados.como_chegou)
    .bind(&dados.reclamacao_cliente)
    .bind(&dados.diagnostico)
    .bind(&dados.o_que_foi_feito)
    .bind(&dados.observacoes)
    .bind(&dados.status)
    .bind(desconto)
    .bind(dados.vencimento)
    .bind(total)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| nao_encontrado("Ordem de serviço", id))?;

    sqlx::query("DELETE FROM servicos_os WHERE ordem_servico_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM pecas_os WHERE ordem_servico_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    inserir_itens(&mut tx, "servicos_os", id, &dados.servicos, &valores_servicos).await?;
    inserir_itens(&mut tx, "pecas_os", id, &dados.pecas, &valores_pecas).await?;

    tx.commit().await?;

    Ok(Json(ordem))
}

/// Lança os itens de uma OS na tabela indicada (servicos_os ou pecas_os)
async fn inserir_itens(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    tabela: &str,
    ordem_id: Uuid,
    itens: &[crate::models::ordem_servico::ItemRequest],
    valores: &[Decimal],
) -> AppResult<()> {
    let sql = format!(
        "INSERT INTO {} (ordem_servico_id, descricao, valor) VALUES ($1, $2, $3)",
        tabela
    );
    for (item, valor) in itens.iter().zip(valores) {
        sqlx::query(&sql)
            .bind(ordem_id)
            .bind(&item.descricao)
            .bind(valor)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn inicio_do_dia(data: Option<NaiveDate>) -> Option<DateTime<Utc>> {
    data.map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Pagamentos de uma OS, em ordem cronológica
pub async fn listar_pagamentos(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<Pagamento>>> {
    verificar_ordem(&state, id).await?;

    let pagamentos = sqlx::query_as::<_, Pagamento>(
        "SELECT * FROM pagamentos WHERE ordem_servico_id = $1 ORDER BY data_pagamento",
    )
    .bind(id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(pagamentos))
}

/// Registra um pagamento na OS. Pagamento a maior é aceito.
pub async fn registrar_pagamento(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(dados): Json<CreatePagamentoRequest>,
) -> AppResult<Json<Pagamento>> {
    dados.validate()?;
    verificar_ordem(&state, id).await?;

    let valor = parse_valor(&dados.valor);

    let pagamento = sqlx::query_as::<_, Pagamento>(
        r#"
        INSERT INTO pagamentos (ordem_servico_id, valor, forma_pagamento, observacoes)
        VALUES ($1, $2, COALESCE($3, 'PIX'), $4)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(valor)
    .bind(&dados.forma_pagamento)
    .bind(&dados.observacoes)
    .fetch_one(&state.pool)
    .await?;

    tracing::info!("💰 Pagamento registrado: {} na OS {}", pagamento.valor, id);
    Ok(Json(pagamento))
}

async fn verificar_ordem(state: &AppState, id: Uuid) -> AppResult<()> {
    let existe: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM ordens_servico WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;
    if existe.is_none() {
        return Err(nao_encontrado("Ordem de serviço", id));
    }
    Ok(())
}
