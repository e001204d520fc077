use crate::{
    data::{Error, GraphEdge, GraphModel, GraphNode, HolderRecord, TransferRecord},
    read::{read_holders, read_transfers},
    style::GraphStyle,
};
use log::{debug, trace, warn};
use rust_decimal::{prelude::ToPrimitive, Decimal};
use std::collections::HashSet;

/// Turns the holders and transactions CSV texts into a `GraphModel`.
///
/// The builder only holds its `GraphStyle`; every call parses and computes
/// from scratch, so one builder can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct LedgerGraphBuilder {
    style: GraphStyle,
}

impl LedgerGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: GraphStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &GraphStyle {
        &self.style
    }

    pub fn build(&self, holders_csv: &str, transactions_csv: &str) -> Result<GraphModel, Error> {
        let holders = read_holders(holders_csv)?;
        let transactions = read_transfers(transactions_csv)?;
        self.assemble(&holders, transactions)
    }

    /// Builds the graph from already parsed records.
    ///
    /// An account listed twice is a bit of a puzzle: the renderer keys its
    /// circles by id, so two nodes with the same id would fight over one
    /// circle. Every record still counts toward the supply and the treasury
    /// pick (those are sums and maxima over the raw list), but only the first
    /// funded record of an account becomes a node, and the percentages can
    /// then add up to less than 100.
    pub fn assemble(
        &self,
        holders: &[HolderRecord],
        transactions: Vec<TransferRecord>,
    ) -> Result<GraphModel, Error> {
        let treasury = find_treasury(holders).ok_or(Error::EmptyHolderSet)?;
        let treasury_id = treasury.account.clone();
        let total_supply = total_supply(holders)?;
        let max_balance = holders
            .iter()
            .map(|h| h.balance)
            .filter(|b| *b > Decimal::ZERO)
            .max()
            .unwrap_or(Decimal::ZERO);
        debug!(
            "{} holders, {} transactions, treasury {treasury_id}, supply {total_supply}",
            holders.len(),
            transactions.len()
        );

        let radius = self.style.radius_scale(to_f64(max_balance));
        let colors = self.style.share_scale();
        let mut node_ids = HashSet::new();
        let mut nodes = Vec::new();
        for holder in holders.iter().filter(|h| h.balance > Decimal::ZERO) {
            if !node_ids.insert(holder.account.as_str()) {
                warn!("Account {} listed more than once", holder.account);
                continue;
            }
            let share = share_of(holder.balance, total_supply);
            let is_treasury = holder.account == treasury_id;
            nodes.push(GraphNode {
                id: holder.account.clone(),
                value: holder.balance,
                percentage: to_percent(share),
                radius: radius.scale(to_f64(holder.balance)),
                color: if is_treasury {
                    self.style.treasury_color
                } else {
                    colors.scale(share)
                },
                is_treasury,
            });
        }

        let links: Vec<GraphEdge> = transactions
            .iter()
            .filter(|tx| {
                let keep = node_ids.contains(tx.sender.as_str())
                    && node_ids.contains(tx.receiver.as_str());
                if !keep {
                    trace!("Dropping transfer {} -> {}", tx.sender, tx.receiver);
                }
                keep
            })
            .map(|tx| GraphEdge {
                source: tx.sender.clone(),
                target: tx.receiver.clone(),
                value: tx.amount,
                timestamp: tx.timestamp,
                color: if tx.sender == treasury_id || tx.receiver == treasury_id {
                    self.style.treasury_color
                } else {
                    self.style.link_color
                },
            })
            .collect();
        debug!("{} nodes, {} links", nodes.len(), links.len());

        Ok(GraphModel {
            nodes,
            links,
            transactions,
            treasury_id,
            total_supply,
            max_balance,
        })
    }
}

/// Shortcut for `LedgerGraphBuilder::new().build(..)` with the stock style.
pub fn build_graph(holders_csv: &str, transactions_csv: &str) -> Result<GraphModel, Error> {
    LedgerGraphBuilder::new().build(holders_csv, transactions_csv)
}

/// The holder with the largest balance; on a tie the earliest one wins.
pub(crate) fn find_treasury(holders: &[HolderRecord]) -> Option<&HolderRecord> {
    let (first, rest) = holders.split_first()?;
    let mut max = first;
    for holder in rest {
        if holder.balance > max.balance {
            max = holder;
        }
    }
    Some(max)
}

/// Sum over every holder, zero and negative balances included.
pub(crate) fn total_supply(holders: &[HolderRecord]) -> Result<Decimal, Error> {
    let mut supply = Decimal::ZERO;
    for holder in holders {
        let sum = supply.checked_add(holder.balance);
        supply = sum.ok_or(Error::SupplyOverflow)?;
    }
    Ok(supply)
}

/// Fraction of `total` held by `balance`; 0 when the total is zero.
fn share_of(balance: Decimal, total: Decimal) -> Decimal {
    balance.checked_div(total).unwrap_or(Decimal::ZERO)
}

fn to_percent(share: Decimal) -> f64 {
    let percent = share.checked_mul(Decimal::ONE_HUNDRED);
    percent.map_or(0.0, to_f64)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
