//! The engine facade: every public operation, wired over injected
//! collaborators.
//!
//! The engine owns no business rules itself; it validates input, asks the
//! pure modules for plans and breakdowns, and applies the results against
//! the store. Multi-write operations compensate on failure (delete what
//! was inserted, reverse the delta) since the store contract only makes
//! single calls atomic.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use caixa_shared::config::AppConfig;
use caixa_shared::types::{BillId, EntryId, LiquidationId, format_brl};

use crate::bills::{self, Bill, BillDisplayStatus, NewBill, PaymentOutcome};
use crate::calendar::{Clock, HolidayCalendar};
use crate::closing::{
    AllocationPlan, AllocationPolicy, ClosingError, DayClosing, Pending, plan_allocations,
    plan_compensation,
};
use crate::error::EngineError;
use crate::intake::{Expense, NewExpense, NewSale, Sale, validate_expense, validate_sale};
use crate::ledger::{Account, AccountKind, AccountLedger, EntryCategory, LedgerEntry};
use crate::settlement::{CardLiquidation, FeeBreakdown, settlement_date};
use crate::statement::{AccountStatement, DailySummary, build_statement, daily_summary};
use crate::storage::LedgerStore;

/// Outcome of one liquidation run.
#[derive(Debug, Default)]
pub struct LiquidationRun {
    /// Liquidations settled this run.
    pub settled: Vec<CardLiquidation>,
    /// Liquidations that failed, with the reason. A failure never stops
    /// the rest of the batch.
    pub failures: Vec<(LiquidationId, String)>,
    /// Pendings retired by the compensation pass that follows settlement.
    pub compensated: Vec<Pending>,
}

/// The ledger engine.
///
/// Generic over its collaborators so tests can pin the date and the
/// holiday set while production wires the local clock and configuration.
pub struct Engine<S, C, H> {
    store: Arc<S>,
    clock: Arc<C>,
    holidays: Arc<H>,
    policy: AllocationPolicy,
}

impl<S, C, H> Engine<S, C, H>
where
    S: LedgerStore,
    C: Clock,
    H: HolidayCalendar,
{
    /// Creates an engine with an explicit policy.
    pub fn new(store: Arc<S>, clock: Arc<C>, holidays: Arc<H>, policy: AllocationPolicy) -> Self {
        Self {
            store,
            clock,
            holidays,
            policy,
        }
    }

    /// Creates an engine with the policy taken from configuration.
    pub fn from_config(
        store: Arc<S>,
        clock: Arc<C>,
        holidays: Arc<H>,
        config: &AppConfig,
    ) -> Self {
        Self::new(store, clock, holidays, AllocationPolicy::from(&config.policy))
    }

    fn ledger(&self) -> AccountLedger<'_, S> {
        AccountLedger::new(self.store.as_ref())
    }

    /// All accounts with current balances.
    pub fn accounts(&self) -> Result<Vec<Account>, EngineError> {
        Ok(self.store.accounts()?)
    }

    /// Current balance of one account.
    pub fn account_balance(&self, kind: AccountKind) -> Result<Decimal, EngineError> {
        Ok(self.ledger().balance(kind)?)
    }

    /// Records a sale.
    ///
    /// Cash and PIX sales credit their account immediately and write a
    /// sale entry. Card sales move no money now: the fee breakdown and the
    /// settlement date are computed up front, and a liquidation record is
    /// scheduled for the next business day after the sale.
    pub fn add_sale(&self, input: NewSale) -> Result<Sale, EngineError> {
        validate_sale(&input)?;

        if let (Some(method), Some(brand)) = (input.method.card_method(), input.card_brand) {
            let fees = FeeBreakdown::compute(input.amount, method, brand);
            let settles_on = settlement_date(input.date, self.holidays.as_ref())?;

            let mut sale = Sale::from_input(input);
            sale.net_amount = Some(fees.net);
            let liquidation = CardLiquidation {
                id: LiquidationId::new(),
                sale_id: sale.id,
                sale_date: sale.date,
                sale_amount: sale.amount,
                card_brand: brand,
                method,
                fee_rate: fees.rate,
                fee_amount: fees.fee,
                net_amount: fees.net,
                settlement_date: settles_on,
                liquidated: false,
            };

            self.store.insert_sale(sale.clone())?;
            if let Err(err) = self.store.insert_liquidation(liquidation) {
                let _ = self.store.delete_sale(sale.id);
                return Err(err.into());
            }

            info!(
                sale = %sale.id,
                amount = %sale.amount,
                %method,
                %brand,
                settles_on = %settles_on,
                "card sale scheduled for settlement"
            );
            return Ok(sale);
        }

        let sale = Sale::from_input(input);
        // validate_sale guarantees non-card methods have a deposit account
        let account = match sale.method.deposit_account() {
            Some(account) => account,
            None => return Err(crate::intake::IntakeError::MissingCardBrand.into()),
        };

        self.store.insert_sale(sale.clone())?;
        if let Err(err) = self.ledger().apply_delta(account, sale.amount) {
            let _ = self.store.delete_sale(sale.id);
            return Err(err.into());
        }
        let entry = LedgerEntry::new(
            sale.date,
            account,
            account,
            sale.amount,
            EntryCategory::Sale,
            format!("Venda ({})", sale.description.as_deref().unwrap_or("sem descrição")),
        )
        .with_reference(sale.id.into_inner());
        if let Err(err) = self.store.append_entry(entry) {
            let _ = self.ledger().apply_delta(account, -sale.amount);
            let _ = self.store.delete_sale(sale.id);
            return Err(err.into());
        }

        info!(sale = %sale.id, amount = %sale.amount, account = %account, "sale recorded");
        Ok(sale)
    }

    /// Records an expense and debits its account immediately.
    pub fn add_expense(&self, input: NewExpense) -> Result<Expense, EngineError> {
        validate_expense(&input)?;
        let expense = Expense::from_input(input);

        self.store.insert_expense(expense.clone())?;
        if let Err(err) = self.ledger().apply_delta(expense.account, -expense.amount) {
            let _ = self.store.delete_expense(expense.id);
            return Err(err.into());
        }
        let entry = LedgerEntry::new(
            expense.date,
            expense.account,
            expense.account,
            expense.amount,
            EntryCategory::Expense,
            format!("Despesa: {}", expense.description),
        )
        .with_reference(expense.id.into_inner());
        if let Err(err) = self.store.append_entry(entry) {
            let _ = self.ledger().apply_delta(expense.account, expense.amount);
            let _ = self.store.delete_expense(expense.id);
            return Err(err.into());
        }

        info!(
            expense = %expense.id,
            amount = %expense.amount,
            account = %expense.account,
            "expense recorded"
        );
        Ok(expense)
    }

    /// The revenue base the closing allocates from.
    ///
    /// Sales dated `date` at their gross value, plus receivable payments
    /// collected on bills due `date`, plus the net of card settlements
    /// landing on `date` for the previous day's sales.
    fn revenue_base(&self, date: NaiveDate) -> Result<Decimal, EngineError> {
        let sales: Decimal = self
            .store
            .sales_on(date)?
            .iter()
            .map(|s| s.amount)
            .sum();

        let receivables: Decimal = self
            .store
            .bills()?
            .iter()
            .filter(|b| b.kind == bills::BillKind::Receivable && b.due_date == date)
            .map(|b| b.paid_amount)
            .sum();

        let previous_day = crate::calendar::add_days(date, -1);
        let settlements: Decimal = self
            .store
            .liquidations()?
            .iter()
            .filter(|l| !l.liquidated && l.settlement_date == date && l.sale_date == previous_day)
            .map(|l| l.net_amount)
            .sum();

        Ok(sales + receivables + settlements)
    }

    /// Computes the closing plan for `date` without moving money.
    pub fn closing_preview(&self, date: NaiveDate) -> Result<AllocationPlan, EngineError> {
        let revenue_base = self.revenue_base(date)?;
        let pix = self.ledger().balance(AccountKind::Pix)?;
        let cash = self.ledger().balance(AccountKind::Cash)?;
        Ok(plan_allocations(&self.policy, revenue_base, pix, cash, date))
    }

    /// Runs the end-of-day closing for `date`.
    ///
    /// Idempotent per date: a persisted closing marker rejects reruns. A
    /// zero-revenue day is a no-op and leaves no marker, so a late sale
    /// can still be closed properly afterwards.
    pub fn execute_end_of_day(&self, date: NaiveDate) -> Result<AllocationPlan, EngineError> {
        if self.store.closing_for(date)?.is_some() {
            return Err(ClosingError::DayAlreadyClosed(date).into());
        }

        let plan = self.closing_preview(date)?;
        if plan.revenue_base == Decimal::ZERO {
            info!(%date, "no revenue, closing skipped");
            return Ok(plan);
        }

        let ledger = self.ledger();
        for step in &plan.steps {
            if step.transferred > Decimal::ZERO {
                ledger.transfer(
                    date,
                    step.kind.source_account(),
                    step.kind.destination_account(),
                    step.transferred,
                    step.kind.category(),
                    format!("Alocação {}", step.kind.label()),
                    None,
                )?;
            }
            if let Some(pending) = &step.pending {
                warn!(
                    kind = ?pending.kind,
                    amount = %pending.amount,
                    "allocation shortfall recorded as pending"
                );
                self.store.insert_pending(pending.clone())?;
            }
        }

        self.store.insert_closing(DayClosing {
            date,
            revenue_base: plan.revenue_base,
        })?;

        info!(
            %date,
            revenue = %format_brl(plan.revenue_base),
            transferred = %format_brl(plan.total_transferred()),
            pending = %format_brl(plan.total_pending()),
            "end-of-day closing executed"
        );
        Ok(plan)
    }

    /// Settles card liquidations due on or before `date`, then retires
    /// whatever pendings the fresh funds can cover.
    ///
    /// Each liquidation settles gross into PIX and books the card fee as
    /// an automatic expense, so the fee shows up in expense reports
    /// instead of silently shrinking revenue. One failed liquidation does
    /// not stop the rest.
    pub fn process_liquidations(&self, date: NaiveDate) -> Result<LiquidationRun, EngineError> {
        let due = self.store.liquidations_due_through(date)?;
        let mut run = LiquidationRun::default();

        for liquidation in due {
            match self.settle_one(&liquidation, date) {
                Ok(()) => run.settled.push(liquidation),
                Err(err) => {
                    warn!(
                        liquidation = %liquidation.id,
                        error = %err,
                        "liquidation failed, continuing batch"
                    );
                    run.failures.push((liquidation.id, err.to_string()));
                }
            }
        }

        run.compensated = self.compensate_pendings()?;
        Ok(run)
    }

    /// Settles one liquidation as a unit: the gross credit, the fee
    /// expense, and both status flips either all land or everything
    /// reversible is taken back, so a retry after a failure credits the
    /// gross exactly once.
    fn settle_one(
        &self,
        liquidation: &CardLiquidation,
        date: NaiveDate,
    ) -> Result<(), EngineError> {
        let ledger = self.ledger();
        let gross = liquidation.sale_amount;

        let settlement_entry = LedgerEntry::new(
            date,
            AccountKind::Pix,
            AccountKind::Pix,
            gross,
            EntryCategory::CardSettlement,
            format!(
                "Liquidação cartão {} {} (venda de {})",
                liquidation.method, liquidation.card_brand, liquidation.sale_date
            ),
        )
        .with_reference(liquidation.sale_id.into_inner());
        let settlement_entry_id = settlement_entry.id;

        ledger.apply_delta(AccountKind::Pix, gross)?;
        if let Err(err) = self.store.append_entry(settlement_entry) {
            let _ = ledger.apply_delta(AccountKind::Pix, -gross);
            return Err(err.into());
        }

        // A tiny sale can round its fee down to zero; skip the expense then.
        let fee_booking = if liquidation.fee_amount > Decimal::ZERO {
            match self.book_settlement_fee(liquidation, date) {
                Ok(booking) => Some(booking),
                Err(err) => {
                    let _ = self.store.remove_entry(settlement_entry_id);
                    let _ = ledger.apply_delta(AccountKind::Pix, -gross);
                    return Err(err);
                }
            }
        } else {
            None
        };

        let flags = self
            .store
            .mark_sale_liquidated(liquidation.sale_id, date)
            .and_then(|_| self.store.mark_liquidation_settled(liquidation.id));
        if let Err(err) = flags {
            // The sale flag may already be set; the retry sets it again.
            if let Some((expense, fee_entry_id)) = &fee_booking {
                let _ = self.store.remove_entry(*fee_entry_id);
                let _ = ledger.apply_delta(AccountKind::Pix, expense.amount);
                let _ = self.store.delete_expense(expense.id);
            }
            let _ = self.store.remove_entry(settlement_entry_id);
            let _ = ledger.apply_delta(AccountKind::Pix, -gross);
            return Err(err.into());
        }

        info!(
            liquidation = %liquidation.id,
            gross = %format_brl(liquidation.sale_amount),
            fee = %format_brl(liquidation.fee_amount),
            net = %format_brl(liquidation.net_amount),
            "card liquidation settled"
        );
        Ok(())
    }

    /// Books the automatic card-fee expense, returning the record and its
    /// audit-entry id so a failing settlement can take both back.
    fn book_settlement_fee(
        &self,
        liquidation: &CardLiquidation,
        date: NaiveDate,
    ) -> Result<(Expense, EntryId), EngineError> {
        let expense = Expense::from_input(NewExpense {
            date,
            amount: liquidation.fee_amount,
            category: "taxa de cartão".into(),
            account: AccountKind::Pix,
            description: format!(
                "Taxa {} {} sobre {}",
                liquidation.method,
                liquidation.card_brand,
                format_brl(liquidation.sale_amount)
            ),
        });

        self.store.insert_expense(expense.clone())?;
        if let Err(err) = self.ledger().apply_delta(AccountKind::Pix, -expense.amount) {
            let _ = self.store.delete_expense(expense.id);
            return Err(err.into());
        }
        let entry = LedgerEntry::new(
            date,
            AccountKind::Pix,
            AccountKind::Pix,
            expense.amount,
            EntryCategory::Expense,
            format!("Despesa: {}", expense.description),
        )
        .with_reference(expense.id.into_inner());
        let entry_id = entry.id;
        if let Err(err) = self.store.append_entry(entry) {
            let _ = self.ledger().apply_delta(AccountKind::Pix, expense.amount);
            let _ = self.store.delete_expense(expense.id);
            return Err(err.into());
        }
        Ok((expense, entry_id))
    }

    /// Retires every pending the current balances can cover in full.
    pub fn compensate_pendings(&self) -> Result<Vec<Pending>, EngineError> {
        let ledger = self.ledger();
        let pendings = self.store.pendings()?;
        let pix = ledger.balance(AccountKind::Pix)?;
        let cash = ledger.balance(AccountKind::Cash)?;
        let plan = plan_compensation(&pendings, pix, cash);

        let today = self.clock.today();
        let mut retired = Vec::with_capacity(plan.steps.len());
        for step in plan.steps {
            let pending = step.pending;
            ledger.transfer(
                today,
                pending.kind.source_account(),
                pending.kind.destination_account(),
                pending.amount,
                pending.kind.category(),
                format!("Compensação: {}", pending.description),
                None,
            )?;
            self.store.delete_pending(pending.id)?;
            info!(pending = %pending.id, amount = %format_brl(pending.amount), "pending compensated");
            retired.push(pending);
        }
        Ok(retired)
    }

    /// Registers a bill.
    pub fn add_bill(&self, input: NewBill) -> Result<Bill, EngineError> {
        bills::validate_bill(&input)?;
        let bill = Bill::from_input(input);
        self.store.insert_bill(bill.clone())?;
        info!(bill = %bill.id, amount = %format_brl(bill.amount), kind = ?bill.kind, "bill registered");
        Ok(bill)
    }

    /// Pays a bill, partially or in full.
    ///
    /// Payables debit the chosen account and book an expense entry;
    /// receivables credit it and book a sale entry. The account defaults
    /// by direction (cash for payables, PIX for receivables).
    pub fn pay_bill(
        &self,
        id: BillId,
        payment: Decimal,
        account: Option<AccountKind>,
        date: NaiveDate,
    ) -> Result<Bill, EngineError> {
        let mut bill = self
            .store
            .bill(id)?
            .ok_or(bills::BillError::NotFound(id))?;
        let account = account.unwrap_or_else(|| bills::default_payment_account(bill.kind));

        let PaymentOutcome { amount, .. } = bills::apply_payment(&mut bill, payment, date, account)?;

        let (delta, category, label) = match bill.kind {
            bills::BillKind::Payable => (-amount, EntryCategory::Expense, "Pagamento de conta"),
            bills::BillKind::Receivable => (amount, EntryCategory::Sale, "Recebimento de conta"),
        };
        let entry = LedgerEntry::new(
            date,
            account,
            account,
            amount,
            category,
            format!("{label}: {}", bill.description),
        )
        .with_reference(bill.id.into_inner());
        let entry_id = entry.id;

        // Money, entry, and bill state move together or not at all.
        self.ledger().apply_delta(account, delta)?;
        if let Err(err) = self.store.append_entry(entry) {
            let _ = self.ledger().apply_delta(account, -delta);
            return Err(err.into());
        }
        let stored = match self.store.update_bill(bill.clone()) {
            Ok(true) => Ok(()),
            Ok(false) => Err(EngineError::from(bills::BillError::NotFound(id))),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = stored {
            let _ = self.store.remove_entry(entry_id);
            let _ = self.ledger().apply_delta(account, -delta);
            return Err(err);
        }

        info!(
            bill = %bill.id,
            paid = %format_brl(amount),
            remaining = %format_brl(bill.amount),
            "bill payment applied"
        );
        Ok(bill)
    }

    /// All bills with their derived display status as of today.
    pub fn bills_with_status(&self) -> Result<Vec<(Bill, BillDisplayStatus)>, EngineError> {
        let today = self.clock.today();
        Ok(self
            .store
            .bills()?
            .into_iter()
            .map(|bill| {
                let status = bills::display_status(&bill, today);
                (bill, status)
            })
            .collect())
    }

    /// Overwrites an account balance, recording an adjustment entry.
    pub fn adjust_balance(&self, kind: AccountKind, value: Decimal) -> Result<(), EngineError> {
        self.ledger().set_balance(kind, value, self.clock.today())?;
        info!(account = %kind, value = %format_brl(value), "balance adjusted");
        Ok(())
    }

    /// Reconstructs one account's statement from the audit trail.
    pub fn statement(&self, account: AccountKind) -> Result<AccountStatement, EngineError> {
        let entries = self.store.entries()?;
        Ok(build_statement(account, &entries))
    }

    /// Totals one day's sales and expenses.
    pub fn summary_for(&self, date: NaiveDate) -> Result<DailySummary, EngineError> {
        let sales = self.store.sales_on(date)?;
        let expenses = self.store.expenses_on(date)?;
        Ok(daily_summary(date, &sales, &expenses))
    }
}
