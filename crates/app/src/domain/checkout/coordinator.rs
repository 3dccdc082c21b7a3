//! Checkout coordinator.

use std::{
    fmt::{self, Debug, Formatter},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use storefront::{
    carts::Cart,
    orders::{NewOrder, Order},
    pricing::{PricingSnapshot, to_minor_units},
    sessions::UserSession,
};
use tracing::{info, warn};

use crate::domain::{
    carts::CartStore,
    checkout::{errors::CheckoutError, phase::CheckoutPhase},
    orders::OrdersLedger,
    payments::{
        PaymentGateway, PaymentSheet, SheetOutcome,
        models::{PaymentAuthorization, PaymentIntentRequest, PaymentItem},
    },
    sessions::SessionHolder,
};

/// How a checkout run ended without error.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// An order was placed and the cart cleared.
    Completed(Order),

    /// The user closed the payment sheet. Nothing changed.
    Cancelled,
}

#[derive(Debug, Default)]
struct PhaseState {
    phase: CheckoutPhase,

    /// Incremented by every checkout that passes its preconditions.
    attempt: u64,
}

type SharedPhase = Arc<Mutex<PhaseState>>;

fn lock(state: &SharedPhase) -> MutexGuard<'_, PhaseState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Carried by every stage value. Dropping the last stage of a checkout that
/// is still in flight puts the coordinator back to `Idle`.
#[derive(Debug)]
struct InFlight {
    state: SharedPhase,
    attempt: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = lock(&self.state);

        if state.attempt == self.attempt && state.phase.is_in_flight() {
            warn!(phase = %state.phase, "checkout abandoned, returning to idle");

            state.phase = CheckoutPhase::Idle;
        }
    }
}

/// A checkout that passed its preconditions and is authorizing.
#[derive(Debug)]
pub struct CheckoutDraft {
    in_flight: InFlight,
    user: UserSession,
    cart: Cart,
    pricing: PricingSnapshot,
    request: PaymentIntentRequest,
}

impl CheckoutDraft {
    /// Pricing captured when the checkout began.
    pub fn pricing(&self) -> PricingSnapshot {
        self.pricing
    }

    /// Amount requested, in minor units.
    pub fn amount(&self) -> i64 {
        self.request.amount
    }
}

/// A checkout holding a payment authorization.
#[derive(Debug)]
pub struct AuthorizedCheckout {
    draft: CheckoutDraft,
    authorization: PaymentAuthorization,
}

/// A checkout whose payment the user confirmed.
#[derive(Debug)]
pub struct PaidCheckout {
    authorized: AuthorizedCheckout,
}

/// Runs checkouts for one session, at most one at a time.
pub struct CheckoutCoordinator {
    cart: CartStore,
    sessions: Arc<SessionHolder>,
    gateway: Arc<dyn PaymentGateway>,
    sheet: Arc<dyn PaymentSheet>,
    ledger: Arc<dyn OrdersLedger>,
    state: SharedPhase,
}

impl Debug for CheckoutCoordinator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutCoordinator")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl CheckoutCoordinator {
    /// Idle coordinator over the given cart, session and services.
    pub fn new(
        cart: CartStore,
        sessions: Arc<SessionHolder>,
        gateway: Arc<dyn PaymentGateway>,
        sheet: Arc<dyn PaymentSheet>,
        ledger: Arc<dyn OrdersLedger>,
    ) -> Self {
        Self {
            cart,
            sessions,
            gateway,
            sheet,
            ledger,
            state: SharedPhase::default(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CheckoutPhase {
        lock(&self.state).phase.clone()
    }

    /// Run every step of a checkout.
    ///
    /// # Errors
    ///
    /// Returns the first step's error. Cancelling the payment sheet is not an
    /// error.
    pub async fn run(&self) -> Result<CheckoutOutcome, CheckoutError> {
        let draft = self.begin()?;
        let authorized = self.authorize(draft).await?;

        let Some(paid) = self.collect_payment(authorized).await? else {
            return Ok(CheckoutOutcome::Cancelled);
        };

        let order = self.commit(paid).await?;

        Ok(CheckoutOutcome::Completed(order))
    }

    /// Check preconditions, snapshot the cart and enter `Authorizing`.
    ///
    /// Failing preconditions leave the phase unchanged and make no network
    /// call. Dropping the draft, or any later stage, before the checkout
    /// ends returns the coordinator to `Idle`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::AlreadyInProgress`], [`CheckoutError::AuthRequired`],
    /// [`CheckoutError::EmptyCart`], [`CheckoutError::InvalidAmount`] or a
    /// pricing error for an unknown currency.
    #[tracing::instrument(name = "checkout.coordinator.begin", skip(self), err)]
    pub fn begin(&self) -> Result<CheckoutDraft, CheckoutError> {
        let mut state = lock(&self.state);

        if state.phase.is_in_flight() {
            return Err(CheckoutError::AlreadyInProgress);
        }

        let user = self.sessions.current().ok_or(CheckoutError::AuthRequired)?;

        let cart = self.cart.snapshot();

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let pricing = PricingSnapshot::for_cart(&cart);
        let amount = to_minor_units(pricing.total, cart.currency())?;

        if amount <= 0 {
            return Err(CheckoutError::InvalidAmount);
        }

        let request = PaymentIntentRequest {
            amount,
            currency: cart.currency().to_string(),
            items: cart.items().iter().map(PaymentItem::from).collect(),
        };

        state.phase = CheckoutPhase::Authorizing;
        state.attempt += 1;

        info!(user = %user.id, amount, items = cart.len(), "checkout started");

        Ok(CheckoutDraft {
            in_flight: InFlight {
                state: Arc::clone(&self.state),
                attempt: state.attempt,
            },
            user,
            cart,
            pricing,
            request,
        })
    }

    /// Request a payment authorization and enter `CollectingPayment`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Gateway`] when the backend fails or returns no
    /// authorization.
    #[tracing::instrument(
        name = "checkout.coordinator.authorize",
        skip(self, draft),
        fields(amount = draft.request.amount),
        err
    )]
    pub async fn authorize(
        &self,
        draft: CheckoutDraft,
    ) -> Result<AuthorizedCheckout, CheckoutError> {
        let authorization = match self
            .gateway
            .create_payment_intent(draft.request.clone())
            .await
        {
            Ok(authorization) => authorization,
            Err(error) => return Err(self.fail(error.into())),
        };

        if let Err(error) = self.sheet.initialize(&authorization).await {
            return Err(self.fail(error.into()));
        }

        self.set_phase(CheckoutPhase::CollectingPayment);

        Ok(AuthorizedCheckout {
            draft,
            authorization,
        })
    }

    /// Present the payment sheet.
    ///
    /// Returns `None` when the user cancels; the phase goes back to `Idle`
    /// and the cart is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Gateway`] when the payment is declined or the
    /// sheet fails.
    #[tracing::instrument(name = "checkout.coordinator.collect_payment", skip_all, err)]
    pub async fn collect_payment(
        &self,
        authorized: AuthorizedCheckout,
    ) -> Result<Option<PaidCheckout>, CheckoutError> {
        match self.sheet.present(&authorized.authorization).await {
            Ok(SheetOutcome::Completed) => {
                self.set_phase(CheckoutPhase::Committing);

                Ok(Some(PaidCheckout { authorized }))
            }
            Ok(SheetOutcome::Cancelled) => {
                self.cancelled();

                Ok(None)
            }
            Err(error) if error.is_cancellation() => {
                self.cancelled();

                Ok(None)
            }
            Err(error) => Err(self.fail(error.into())),
        }
    }

    /// Write the order, clear the cart and enter `Succeeded`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::PostPaymentCommitFailure`] when the ledger
    /// write fails. The cart is kept.
    #[tracing::instrument(name = "checkout.coordinator.commit", skip_all, err)]
    pub async fn commit(&self, paid: PaidCheckout) -> Result<Order, CheckoutError> {
        let AuthorizedCheckout {
            draft,
            authorization,
        } = paid.authorized;

        let generation = draft.cart.generation();
        let payment_intent_id = authorization.payment_intent_id;

        let new_order = NewOrder::from_cart(
            draft.user.id,
            &draft.cart,
            draft.pricing,
            payment_intent_id.clone(),
        );

        let order = match self.ledger.place_order(new_order).await {
            Ok(order) => order,
            Err(source) => {
                return Err(self.fail(CheckoutError::PostPaymentCommitFailure {
                    payment_intent_id,
                    source,
                }));
            }
        };

        if self.cart.generation() != generation {
            warn!(order = %order.id, "cart changed during checkout, clearing anyway");
        }

        self.cart.clear();

        info!(order = %order.id, total = %order.total, "checkout completed");

        self.set_phase(CheckoutPhase::Succeeded {
            order_id: order.id.clone(),
        });

        Ok(order)
    }

    fn cancelled(&self) {
        info!("payment cancelled by user");

        self.set_phase(CheckoutPhase::Idle);
    }

    fn fail(&self, error: CheckoutError) -> CheckoutError {
        self.set_phase(CheckoutPhase::Failed {
            message: error.user_message(),
        });

        error
    }

    fn set_phase(&self, phase: CheckoutPhase) {
        lock(&self.state).phase = phase;
    }
}
