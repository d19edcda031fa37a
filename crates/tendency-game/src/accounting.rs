//! Accounting Module
//!
//! Applies buy/sell orders to a session's cash/position/average-cost
//! ledger. All mutations are all-or-nothing: every figure is computed and
//! range-checked before the session is touched.

use game_core::{GameError, GameSession};

/// Apply a buy order at `price` per unit.
///
/// Average cost is the volume-weighted moving average over all buys,
/// rounded to the nearest integer currency unit. Sells never adjust it
/// retroactively.
pub fn apply_buy(session: &mut GameSession, quantity: i64, price: i64) -> Result<(), GameError> {
    let cost = quantity
        .checked_mul(price)
        .ok_or(GameError::ArithmeticOverflow)?;
    if cost > session.cash {
        return Err(GameError::InsufficientCash {
            required: cost,
            available: session.cash,
        });
    }
    let remaining = session
        .cash
        .checked_sub(cost)
        .ok_or(GameError::ArithmeticOverflow)?;
    if remaining < 0 {
        return Err(GameError::ArithmeticOverflow);
    }

    let new_quantity = session
        .quantity
        .checked_add(quantity)
        .ok_or(GameError::ArithmeticOverflow)?;
    let held_cost = session
        .quantity
        .checked_mul(session.average_cost)
        .ok_or(GameError::ArithmeticOverflow)?;
    let total_cost = held_cost
        .checked_add(cost)
        .ok_or(GameError::ArithmeticOverflow)?;
    let new_average = if new_quantity == 0 {
        0
    } else {
        (total_cost as f64 / new_quantity as f64).round() as i64
    };

    session.cash = remaining;
    session.quantity = new_quantity;
    session.average_cost = new_average;
    Ok(())
}

/// Apply a sell order at `price` per unit.
///
/// Realized profit moves by `(price - average_cost) * quantity`, which can
/// be negative. Average cost resets to 0 when the position is closed out.
pub fn apply_sell(session: &mut GameSession, quantity: i64, price: i64) -> Result<(), GameError> {
    if quantity > session.quantity {
        return Err(GameError::InsufficientHolding {
            requested: quantity,
            held: session.quantity,
        });
    }
    let revenue = quantity
        .checked_mul(price)
        .ok_or(GameError::ArithmeticOverflow)?;
    let new_cash = session
        .cash
        .checked_add(revenue)
        .ok_or(GameError::ArithmeticOverflow)?;
    let unit_profit = price
        .checked_sub(session.average_cost)
        .ok_or(GameError::ArithmeticOverflow)?;
    let profit = unit_profit
        .checked_mul(quantity)
        .ok_or(GameError::ArithmeticOverflow)?;
    let new_realized = session
        .realized_profit
        .checked_add(profit)
        .ok_or(GameError::ArithmeticOverflow)?;
    let remaining = session.quantity - quantity;

    session.cash = new_cash;
    session.quantity = remaining;
    session.realized_profit = new_realized;
    if remaining == 0 {
        session.average_cost = 0;
    }
    Ok(())
}

/// Percentage yield of `total_asset` over the initial cash
pub fn total_yield(initial_cash: i64, total_asset: i64) -> f64 {
    if initial_cash == 0 {
        return 0.0;
    }
    (total_asset - initial_cash) as f64 / initial_cash as f64 * 100.0
}
